//! quizrun-core: Question model, timed answer collection, and scoring.
//!
//! This crate holds everything that happens between "we have a list of
//! questions" and "here is the score": option rendering, the race between a
//! per-question deadline and a blocking line read, and the session driver that
//! ties them together.

pub mod collector;
pub mod error;
pub mod input;
pub mod model;
pub mod options;
pub mod report;
pub mod session;
pub mod traits;
