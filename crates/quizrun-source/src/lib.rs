//! quizrun-source: question API client and configuration.
//!
//! Implements the `QuestionSource` trait against QuizAPI and resolves the
//! quiz configuration from CLI flags, the environment, a `.env` settings file,
//! and an optional TOML config file.

pub mod config;
pub mod error;
pub mod mock;
pub mod quizapi;

pub use config::{load_config_from, load_env_file, ConfigLayer, QuizConfig};
pub use error::SourceError;
pub use quizapi::{decode_questions, QuizApiClient};
