//! Quiz session driver.
//!
//! Asks questions in order, one timed answer each, and keeps the running
//! score. A timeout or a collection error stops the session on the spot; the
//! score so far is still returned.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::collector::AnswerCollector;
use crate::error::CollectError;
use crate::model::{AnswerOutcome, Question, QuizResult};
use crate::options::AnswerOption;
use crate::report::{EndReason, SessionReport};
use crate::traits::AnswerInput;

/// Configuration for a quiz session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Time allowed per question.
    pub time_limit: Duration,
    /// Configured number of questions. Also the score denominator.
    pub question_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            question_limit: 1,
        }
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// All questions were answered.
    Completed,
    /// The deadline fired on the question at this index.
    TimedOut { question: usize },
    /// Input was invalid or unavailable.
    Aborted(CollectError),
}

impl SessionEnd {
    pub fn reason(&self) -> EndReason {
        match self {
            SessionEnd::Completed => EndReason::Completed,
            SessionEnd::TimedOut { .. } => EndReason::TimedOut,
            SessionEnd::Aborted(_) => EndReason::Aborted,
        }
    }
}

/// Everything a finished session produced.
#[derive(Debug)]
pub struct SessionSummary {
    pub result: QuizResult,
    pub end: SessionEnd,
    pub report: SessionReport,
}

/// Progress reporting trait.
pub trait SessionReporter: Send + Sync {
    fn on_question(
        &self,
        index: usize,
        question: &Question,
        options: &[AnswerOption<'_>],
        time_limit: Duration,
    );
    fn on_answer(&self, question: &Question, letter: char, correct: bool);
    fn on_timeout(&self, question: &Question);
    fn on_finish(&self, result: &QuizResult, end: &SessionEnd);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl SessionReporter for NoopReporter {
    fn on_question(&self, _: usize, _: &Question, _: &[AnswerOption<'_>], _: Duration) {}
    fn on_answer(&self, _: &Question, _: char, _: bool) {}
    fn on_timeout(&self, _: &Question) {}
    fn on_finish(&self, _: &QuizResult, _: &SessionEnd) {}
}

/// Drives one quiz session.
pub struct QuizSession {
    collector: AnswerCollector,
    config: SessionConfig,
}

impl QuizSession {
    pub fn new(input: Arc<dyn AnswerInput>, config: SessionConfig) -> Self {
        Self {
            collector: AnswerCollector::new(input, config.time_limit),
            config,
        }
    }

    /// Run the quiz over `questions`, at most `question_limit` of them.
    pub async fn run(
        &self,
        questions: &[Question],
        reporter: &dyn SessionReporter,
    ) -> SessionSummary {
        let mut result = QuizResult::new(self.config.question_limit);
        let mut report = SessionReport::new(self.config.question_limit);
        let limit = self.config.question_limit as usize;

        for (index, question) in questions.iter().take(limit).enumerate() {
            if question.is_multi_select() {
                warn!(
                    id = question.id,
                    "question has several correct options; only one letter is scored"
                );
            }

            let options = question.options();
            reporter.on_question(index, question, &options, self.collector.time_limit());

            let end = match self.collector.collect().await {
                Ok(AnswerOutcome::Answered(letter)) => {
                    let correct = question.is_correct(letter);
                    result.record(question.score_for(letter));
                    report.record(question, Some(letter), correct);
                    reporter.on_answer(question, letter, correct);
                    debug!(id = question.id, %letter, correct, "answer recorded");
                    continue;
                }
                Ok(AnswerOutcome::TimedOut) => {
                    report.record(question, None, false);
                    reporter.on_timeout(question);
                    SessionEnd::TimedOut { question: index }
                }
                Err(e) => SessionEnd::Aborted(e),
            };
            return finish(result, report, end, reporter);
        }

        finish(result, report, SessionEnd::Completed, reporter)
    }
}

fn finish(
    result: QuizResult,
    mut report: SessionReport,
    end: SessionEnd,
    reporter: &dyn SessionReporter,
) -> SessionSummary {
    let abort_reason = match &end {
        SessionEnd::Aborted(e) => Some(e.to_string()),
        _ => None,
    };
    report.finish(result.score, end.reason(), abort_reason);
    reporter.on_finish(&result, &end);
    SessionSummary {
        result,
        end,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};
    use std::sync::Mutex;

    use crate::input::ReaderInput;

    /// One scripted input step.
    enum Step {
        Line(&'static str),
        /// Never answers.
        Silence,
    }

    struct ScriptedInput {
        steps: Mutex<VecDeque<Step>>,
    }

    impl ScriptedInput {
        fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
            })
        }
    }

    impl AnswerInput for ScriptedInput {
        fn read_line(&self) -> io::Result<Option<String>> {
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(Step::Line(line)) => Ok(Some(line.to_string())),
                Some(Step::Silence) => loop {
                    std::thread::park();
                },
                None => Ok(None),
            }
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
        time_limits: Mutex<Vec<Duration>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SessionReporter for RecordingReporter {
        fn on_question(
            &self,
            index: usize,
            _: &Question,
            options: &[AnswerOption<'_>],
            time_limit: Duration,
        ) {
            self.time_limits.lock().unwrap().push(time_limit);
            self.events
                .lock()
                .unwrap()
                .push(format!("question {index} ({} options)", options.len()));
        }
        fn on_answer(&self, _: &Question, letter: char, correct: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("answer {letter} {correct}"));
        }
        fn on_timeout(&self, _: &Question) {
            self.events.lock().unwrap().push("timeout".into());
        }
        fn on_finish(&self, result: &QuizResult, _: &SessionEnd) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finish {}/{}", result.score, result.total));
        }
    }

    fn question(id: u64, correct: char) -> Question {
        let mut correct_answers = serde_json::Map::new();
        for letter in ['a', 'b', 'c', 'd'] {
            correct_answers.insert(
                format!("answer_{letter}_correct"),
                serde_json::Value::String((letter == correct).to_string()),
            );
        }
        serde_json::from_value(serde_json::json!({
            "id": id,
            "question": format!("question {id}"),
            "answers": {
                "answer_a": "one",
                "answer_b": "two",
                "answer_c": "three",
                "answer_d": "four",
                "answer_e": null,
                "answer_f": null
            },
            "correct_answers": correct_answers,
            "category": "Linux",
            "difficulty": "Easy"
        }))
        .unwrap()
    }

    fn session(input: Arc<dyn AnswerInput>, limit: u32, time_limit: Duration) -> QuizSession {
        QuizSession::new(
            input,
            SessionConfig {
                time_limit,
                question_limit: limit,
            },
        )
    }

    #[tokio::test]
    async fn completes_all_questions() {
        let questions = vec![question(1, 'a'), question(2, 'b'), question(3, 'c')];
        let input = Arc::new(ReaderInput::new(Cursor::new("a\nd\nc\n")));
        let reporter = RecordingReporter::default();

        let summary = session(input, 3, Duration::from_secs(5))
            .run(&questions, &reporter)
            .await;

        assert!(matches!(summary.end, SessionEnd::Completed));
        assert_eq!(summary.result.score, 2);
        assert_eq!(summary.result.total, 3);
        assert_eq!(summary.result.answered, 3);
        assert_eq!(summary.report.ended_by, EndReason::Completed);
        assert_eq!(
            reporter.events(),
            vec![
                "question 0 (4 options)",
                "answer a true",
                "question 1 (4 options)",
                "answer d false",
                "question 2 (4 options)",
                "answer c true",
                "finish 2/3",
            ]
        );
    }

    #[tokio::test]
    async fn timeout_on_third_question_keeps_partial_score() {
        let questions = vec![question(1, 'a'), question(2, 'b'), question(3, 'c')];
        let input = ScriptedInput::new(vec![Step::Line("a\n"), Step::Line("b\n"), Step::Silence]);

        let summary = session(input, 3, Duration::from_millis(200))
            .run(&questions, &NoopReporter)
            .await;

        assert!(matches!(summary.end, SessionEnd::TimedOut { question: 2 }));
        assert_eq!(summary.result.score, 2);
        assert_eq!(summary.result.total, 3);
        assert_eq!(summary.report.answers.len(), 3);
        assert_eq!(summary.report.answers[2].answer, None);
    }

    #[tokio::test]
    async fn timeout_stops_before_remaining_questions() {
        let questions = vec![question(1, 'a'), question(2, 'b')];
        let input = ScriptedInput::new(vec![Step::Silence, Step::Line("b\n")]);
        let reporter = RecordingReporter::default();

        let summary = session(input, 2, Duration::from_millis(50))
            .run(&questions, &reporter)
            .await;

        assert!(matches!(summary.end, SessionEnd::TimedOut { question: 0 }));
        assert_eq!(summary.result.score, 0);
        assert_eq!(
            reporter.events(),
            vec!["question 0 (4 options)", "timeout", "finish 0/2"]
        );
    }

    #[tokio::test]
    async fn invalid_input_aborts_with_prior_score() {
        let questions = vec![question(1, 'a'), question(2, 'b'), question(3, 'c')];
        let input = Arc::new(ReaderInput::new(Cursor::new("a\n42\nc\n")));

        let summary = session(input, 3, Duration::from_secs(5))
            .run(&questions, &NoopReporter)
            .await;

        assert!(matches!(
            summary.end,
            SessionEnd::Aborted(CollectError::InvalidInput(_))
        ));
        assert_eq!(summary.result.score, 1);
        assert_eq!(summary.result.answered, 1);
        assert_eq!(summary.report.ended_by, EndReason::Aborted);
        assert!(summary.report.abort_reason.is_some());
    }

    #[tokio::test]
    async fn closed_input_aborts() {
        let questions = vec![question(1, 'a'), question(2, 'b')];
        let input = Arc::new(ReaderInput::new(Cursor::new("a\n")));

        let summary = session(input, 2, Duration::from_secs(5))
            .run(&questions, &NoopReporter)
            .await;

        assert!(matches!(
            summary.end,
            SessionEnd::Aborted(CollectError::InputClosed)
        ));
        assert_eq!(summary.result.score, 1);
    }

    #[tokio::test]
    async fn never_asks_more_than_the_limit() {
        let questions = vec![question(1, 'a'), question(2, 'b'), question(3, 'c')];
        let input = Arc::new(ReaderInput::new(Cursor::new("a\nb\nc\n")));

        let summary = session(input, 2, Duration::from_secs(5))
            .run(&questions, &NoopReporter)
            .await;

        assert!(matches!(summary.end, SessionEnd::Completed));
        assert_eq!(summary.result.score, 2);
        assert_eq!(summary.result.total, 2);
        assert_eq!(summary.report.answers.len(), 2);
    }

    #[tokio::test]
    async fn question_without_options_is_still_asked() {
        let bare: Question =
            serde_json::from_value(serde_json::json!({"id": 9, "question": "empty?"})).unwrap();
        let input = Arc::new(ReaderInput::new(Cursor::new("a\n")));
        let reporter = RecordingReporter::default();

        let summary = session(input, 1, Duration::from_secs(5))
            .run(&[bare], &reporter)
            .await;

        assert_eq!(summary.result.score, 0);
        assert_eq!(reporter.events()[0], "question 0 (0 options)");
    }

    #[tokio::test]
    async fn reporter_sees_configured_time_limit() {
        let questions = vec![question(1, 'a'), question(2, 'b')];
        let input = Arc::new(ReaderInput::new(Cursor::new("a
b
")));
        let reporter = RecordingReporter::default();

        session(input, 2, Duration::from_secs(7))
            .run(&questions, &reporter)
            .await;

        assert_eq!(
            *reporter.time_limits.lock().unwrap(),
            vec![Duration::from_secs(7), Duration::from_secs(7)]
        );
    }
}
