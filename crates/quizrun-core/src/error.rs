//! Answer collection error types.
//!
//! Every variant ends the session. There is no re-prompt.

use thiserror::Error;

/// Errors that can occur while collecting an answer from the player.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The line was empty, longer than one character, or not a letter.
    #[error("invalid input: {0:?} is not a single letter")]
    InvalidInput(String),

    /// End of input reached before an answer arrived.
    #[error("input closed before an answer was entered")]
    InputClosed,

    /// Reading the line failed.
    #[error("error reading input: {0}")]
    Io(#[from] std::io::Error),
}
