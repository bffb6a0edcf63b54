//! Quiz configuration loading.
//!
//! Values come from four layers, highest precedence first: CLI flags, the
//! environment (after a best-effort `.env` load), a TOML config file, and
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use quizrun_core::session::SessionConfig;
use quizrun_core::traits::QuestionQuery;

use crate::quizapi::DEFAULT_BASE_URL;

/// Environment variable holding the QuizAPI key.
pub const API_KEY_ENV: &str = "API_KEY";

const DEFAULT_LIMIT: u32 = 1;
const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// One layer of partially specified settings.
///
/// The TOML config file deserializes straight into this; CLI flags and the
/// environment are turned into layers too.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

impl ConfigLayer {
    /// Settings taken from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    /// Fill every unset field of `self` from `lower`.
    pub fn merge(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            api_key: non_empty(self.api_key).or(non_empty(lower.api_key)),
            base_url: non_empty(self.base_url).or(non_empty(lower.base_url)),
            category: non_empty(self.category).or(non_empty(lower.category)),
            difficulty: non_empty(self.difficulty).or(non_empty(lower.difficulty)),
            limit: self.limit.or(lower.limit),
            time_limit_secs: self.time_limit_secs.or(lower.time_limit_secs),
        }
    }

    /// Turn the merged layer into a complete configuration.
    pub fn resolve(self) -> Result<QuizConfig> {
        let api_key = non_empty(self.api_key).with_context(|| {
            format!("no API key: pass --api-key or set {API_KEY_ENV} (environment or .env file)")
        })?;
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        let time_limit_secs = self.time_limit_secs.unwrap_or(DEFAULT_TIME_LIMIT_SECS);

        anyhow::ensure!(limit >= 1, "question limit must be at least 1");
        anyhow::ensure!(time_limit_secs >= 1, "time limit must be at least 1 second");

        Ok(QuizConfig {
            api_key,
            base_url: non_empty(self.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            category: non_empty(self.category),
            difficulty: non_empty(self.difficulty),
            limit,
            time_limit: Duration::from_secs(time_limit_secs),
        })
    }

    fn resolve_env_refs(self) -> Self {
        let expand = |v: Option<String>| v.map(|s| resolve_env_vars(&s));
        Self {
            api_key: expand(self.api_key),
            base_url: expand(self.base_url),
            category: expand(self.category),
            difficulty: expand(self.difficulty),
            ..self
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Fully resolved quiz configuration. Immutable once built.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone)]
pub struct QuizConfig {
    pub api_key: String,
    pub base_url: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    /// Number of questions to request; also the score denominator.
    pub limit: u32,
    /// Time allowed per question.
    pub time_limit: Duration,
}

impl std::fmt::Debug for QuizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("category", &self.category)
            .field("difficulty", &self.difficulty)
            .field("limit", &self.limit)
            .field("time_limit", &self.time_limit)
            .finish()
    }
}

impl QuizConfig {
    pub fn query(&self) -> QuestionQuery {
        QuestionQuery {
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
            limit: self.limit,
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            time_limit: self.time_limit,
            question_limit: self.limit,
        }
    }
}

/// Load a `.env`-style settings file into the process environment.
///
/// Best-effort: a missing or unreadable file is logged and otherwise ignored.
/// Variables already set in the environment are not overridden.
pub fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => debug!(path = %path.display(), "loaded settings file"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not load settings file"),
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not rescanned, so a value containing `${` is kept as is.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load the TOML config layer from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// No file found means an empty layer.
pub fn load_config_from(path: Option<&Path>) -> Result<ConfigLayer> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrun.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let layer = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            debug!(path = %path.display(), "loaded config file");
            toml::from_str::<ConfigLayer>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ConfigLayer::default(),
    };

    Ok(layer.resolve_env_refs())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}
