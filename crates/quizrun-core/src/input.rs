//! `AnswerInput` implementations.

use std::io::{self, BufRead};
use std::sync::Mutex;

use crate::traits::AnswerInput;

/// Reads answers from the process's standard input.
///
/// `Stdin::read_line` takes the global stdin lock, which serializes readers.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinInput;

impl AnswerInput for StdinInput {
    fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// Reads answers from any buffered reader behind a mutex.
pub struct ReaderInput<R> {
    reader: Mutex<R>,
}

impl<R: BufRead + Send + 'static> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

impl<R: BufRead + Send + 'static> AnswerInput for ReaderInput<R> {
    fn read_line(&self) -> io::Result<Option<String>> {
        // A poisoned lock still guards a usable reader.
        let mut reader = self
            .reader
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut line = String::new();
        match reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}
