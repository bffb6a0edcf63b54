//! Option rendering.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{answer_key, OPTION_LETTERS};

/// One displayable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption<'a> {
    pub letter: char,
    pub text: &'a str,
}

impl fmt::Display for AnswerOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}", self.letter, self.text)
    }
}

/// Return the non-empty slots among `answer_a`..`answer_f`, in letter order.
pub fn render_options(answers: &BTreeMap<String, String>) -> Vec<AnswerOption<'_>> {
    OPTION_LETTERS
        .iter()
        .filter_map(|&letter| {
            answers
                .get(&answer_key(letter))
                .filter(|text| !text.is_empty())
                .map(|text| AnswerOption {
                    letter,
                    text: text.as_str(),
                })
        })
        .collect()
}
