//! Core trait definitions for question sources and answer input.
//!
//! `QuestionSource` is implemented by the `quizrun-source` crate;
//! `AnswerInput` implementations live in [`crate::input`].

use std::io;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::Question;

// ---------------------------------------------------------------------------
// Question source trait
// ---------------------------------------------------------------------------

/// Trait for backends that supply quiz questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "quizapi").
    fn name(&self) -> &str;

    /// Fetch questions matching `query`.
    ///
    /// An empty result is an error, not an empty `Vec`.
    async fn fetch(&self, query: &QuestionQuery) -> anyhow::Result<Vec<Question>>;
}

/// Filters for a question fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionQuery {
    /// Category filter (e.g. "Linux").
    #[serde(default)]
    pub category: Option<String>,
    /// Difficulty filter (Easy, Medium, Hard).
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Maximum number of questions.
    pub limit: u32,
}

// ---------------------------------------------------------------------------
// Answer input trait
// ---------------------------------------------------------------------------

/// A blocking source of answer lines.
///
/// Implementations must serialize concurrent `read_line` calls so that a read
/// abandoned after a timeout consumes the next line before a later read can.
pub trait AnswerInput: Send + Sync + 'static {
    /// Block until a full line is available. `Ok(None)` means end of input.
    fn read_line(&self) -> io::Result<Option<String>>;
}
