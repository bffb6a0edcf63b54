//! Question source error types.

use thiserror::Error;

/// Errors that can occur when fetching questions.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The service answered with an `{"error": ...}` body.
    #[error("question API error: {0}")]
    Rejected(String),

    /// The API returned a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The body was neither a question list nor an error object.
    #[error("failed to decode questions: {0}")]
    Decode(String),

    /// The question list was empty.
    #[error("No questions found... Try with different category or tag.")]
    NoQuestions,

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
