//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Question;

/// A record of one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the first question was shown.
    pub started_at: DateTime<Utc>,
    /// When the session ended.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    pub score: u32,
    /// Configured question limit.
    pub total: u32,
    /// How the session ended.
    pub ended_by: EndReason,
    /// Detail for an aborted session.
    #[serde(default)]
    pub abort_reason: Option<String>,
    /// One entry per question shown.
    pub answers: Vec<AnswerRecord>,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Every question was answered.
    Completed,
    /// A question's deadline fired.
    TimedOut,
    /// Invalid or closed input.
    Aborted,
    /// Not finished yet.
    InProgress,
}

/// What happened to a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u64,
    pub question: String,
    pub category: String,
    pub difficulty: String,
    /// `None` when the question timed out.
    pub answer: Option<char>,
    pub correct: bool,
}

impl SessionReport {
    /// Start a new report for a session with `total` questions.
    pub fn new(total: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            score: 0,
            total,
            ended_by: EndReason::InProgress,
            abort_reason: None,
            answers: Vec::new(),
        }
    }

    /// Record the outcome of one question.
    pub fn record(&mut self, question: &Question, answer: Option<char>, correct: bool) {
        self.answers.push(AnswerRecord {
            question_id: question.id,
            question: question.question.clone(),
            category: question.category.clone(),
            difficulty: question.difficulty.clone(),
            answer,
            correct,
        });
    }

    /// Stamp the end of the session.
    pub fn finish(&mut self, score: u32, ended_by: EndReason, abort_reason: Option<String>) {
        self.score = score;
        self.ended_by = ended_by;
        self.abort_reason = abort_reason;
        self.finished_at = Some(Utc::now());
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
