//! Timed answer collection.
//!
//! Each call to [`AnswerCollector::collect`] races a deadline against one
//! blocking line read. The read runs on its own detached thread and hands its
//! line back over a fresh one-shot channel. Whichever finishes first decides
//! the outcome. A read that loses the race is abandoned. It keeps running until
//! a line arrives, then its send fails because the receiver is gone, and the
//! line is discarded.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::CollectError;
use crate::model::AnswerOutcome;
use crate::traits::AnswerInput;

/// Collects one answer per call, bounded by a time limit.
pub struct AnswerCollector {
    input: Arc<dyn AnswerInput>,
    time_limit: Duration,
}

impl AnswerCollector {
    pub fn new(input: Arc<dyn AnswerInput>, time_limit: Duration) -> Self {
        Self { input, time_limit }
    }

    /// Per-question time limit.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Wait for a single-letter answer or the deadline, whichever comes first.
    pub async fn collect(&self) -> Result<AnswerOutcome, CollectError> {
        let deadline = tokio::time::sleep(self.time_limit);

        let (tx, rx) = oneshot::channel();
        let input = Arc::clone(&self.input);
        thread::Builder::new()
            .name("answer-reader".into())
            .spawn(move || {
                let line = input.read_line();
                // Err here means the deadline already won.
                let _ = tx.send(line);
            })?;

        tokio::select! {
            _ = deadline => {
                debug!(time_limit_secs = self.time_limit.as_secs(), "answer timed out");
                Ok(AnswerOutcome::TimedOut)
            }
            received = rx => match received {
                Ok(Ok(Some(line))) => parse_answer(&line).map(AnswerOutcome::Answered),
                Ok(Ok(None)) => Err(CollectError::InputClosed),
                Ok(Err(e)) => Err(CollectError::Io(e)),
                // Reader thread died without sending.
                Err(_) => Err(CollectError::InputClosed),
            },
        }
    }
}

/// Validate one input line: after trimming it must be exactly one alphabetic character.
pub fn parse_answer(line: &str) -> Result<char, CollectError> {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(CollectError::InvalidInput(trimmed.to_string())),
    }
}
