//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizrun_core::model::Question;
use quizrun_core::traits::{QuestionQuery, QuestionSource};

use crate::error::SourceError;

/// A question source that serves a fixed list without any network calls.
pub struct MockSource {
    questions: Vec<Question>,
    call_count: AtomicU32,
    last_query: Mutex<Option<QuestionQuery>>,
}

impl MockSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Get the number of fetches made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last query received.
    pub fn last_query(&self) -> Option<QuestionQuery> {
        self.last_query
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap_or_else(|p| p.into_inner()) = Some(query.clone());

        if self.questions.is_empty() {
            return Err(SourceError::NoQuestions.into());
        }
        Ok(self
            .questions
            .iter()
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64) -> Question {
        serde_json::from_value(serde_json::json!({"id": id, "question": "q"})).unwrap()
    }

    fn query(limit: u32) -> QuestionQuery {
        QuestionQuery {
            category: None,
            difficulty: None,
            limit,
        }
    }

    #[tokio::test]
    async fn serves_up_to_limit() {
        let source = MockSource::new(vec![question(1), question(2), question(3)]);
        let questions = source.fetch(&query(2)).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(source.call_count(), 1);
        assert_eq!(source.last_query().unwrap().limit, 2);
    }

    #[tokio::test]
    async fn empty_source_reports_no_questions() {
        let source = MockSource::new(vec![]);
        let err = source.fetch(&query(1)).await.unwrap_err();
        assert!(err.to_string().contains("No questions found"));
    }
}
