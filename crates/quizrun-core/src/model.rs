//! Core data model types for quizrun.
//!
//! `Question` mirrors the JSON records served by the question API. Answer
//! slots are keyed `answer_a`..`answer_f`; correctness is keyed
//! `answer_a_correct`..`answer_f_correct` with string values `"true"` or
//! `"false"`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::options::{render_options, AnswerOption};

/// Option letters in display order.
pub const OPTION_LETTERS: [char; 6] = ['a', 'b', 'c', 'd', 'e', 'f'];

/// A single multiple-choice question as fetched from the question API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// API-assigned identifier.
    pub id: u64,
    /// The prompt shown to the player.
    pub question: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Option text keyed by slot (`answer_a`..`answer_f`). Null slots are dropped.
    #[serde(default, deserialize_with = "non_null_entries")]
    pub answers: BTreeMap<String, String>,
    /// `"true"` when more than one option is correct.
    #[serde(default)]
    pub multiple_correct_answers: Option<String>,
    /// Correctness keyed by `answer_<letter>_correct`. Null entries are dropped.
    #[serde(default, deserialize_with = "non_null_entries")]
    pub correct_answers: BTreeMap<String, String>,
    /// Why the correct answer is correct.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Optional hint.
    #[serde(default)]
    pub tip: Option<String>,
    /// Opaque tag objects.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
}

impl Question {
    /// The populated options in `a..f` order.
    pub fn options(&self) -> Vec<AnswerOption<'_>> {
        render_options(&self.answers)
    }

    /// Whether `letter` is marked correct. Only the exact string `"true"` counts.
    pub fn is_correct(&self, letter: char) -> bool {
        self.correct_answers
            .get(&correctness_key(letter))
            .is_some_and(|v| v == "true")
    }

    /// Points awarded for answering `letter`: 1 if correct, otherwise 0.
    pub fn score_for(&self, letter: char) -> u32 {
        u32::from(self.is_correct(letter))
    }

    /// Letters whose correctness flag is `"true"`.
    pub fn correct_letters(&self) -> Vec<char> {
        OPTION_LETTERS
            .iter()
            .copied()
            .filter(|&l| self.is_correct(l))
            .collect()
    }

    /// Multi-select questions are asked like any other; only one letter is scored.
    pub fn is_multi_select(&self) -> bool {
        self.multiple_correct_answers.as_deref() == Some("true")
    }
}

/// `answer_<letter>`
pub fn answer_key(letter: char) -> String {
    format!("answer_{letter}")
}

/// `answer_<letter>_correct`
pub fn correctness_key(letter: char) -> String {
    format!("answer_{letter}_correct")
}

/// Result of one timed collection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// A single letter entered before the deadline.
    Answered(char),
    /// The deadline fired first.
    TimedOut,
}

impl AnswerOutcome {
    /// Score contribution of this outcome for `question`. A timeout is worth 0.
    pub fn score(&self, question: &Question) -> u32 {
        match self {
            AnswerOutcome::Answered(letter) => question.score_for(*letter),
            AnswerOutcome::TimedOut => 0,
        }
    }
}

/// Running score of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Points earned so far, in `[0, total]`.
    pub score: u32,
    /// Denominator: the configured question limit.
    pub total: u32,
    /// Questions that received an answer.
    pub answered: u32,
}

impl QuizResult {
    pub fn new(total: u32) -> Self {
        Self {
            score: 0,
            total,
            answered: 0,
        }
    }

    /// Record one answered question.
    pub fn record(&mut self, points: u32) {
        self.score += points;
        self.answered += 1;
    }
}

fn non_null_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
