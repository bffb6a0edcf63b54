//! Console progress reporter.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use quizrun_core::model::{Question, QuizResult};
use quizrun_core::options::AnswerOption;
use quizrun_core::session::{SessionEnd, SessionReporter};

/// Prints questions, options, and the final score to a terminal-like writer.
pub struct ConsoleReporter<W> {
    out: Mutex<W>,
    show_answers: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(show_answers: bool) -> Self {
        Self::new(io::stdout(), show_answers)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W, show_answers: bool) -> Self {
        Self {
            out: Mutex::new(out),
            show_answers,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|p| p.into_inner())
    }

    // Terminal write failures are not worth aborting a quiz over.
    fn emit(&self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        let _ = f(&mut *out).and_then(|()| out.flush());
    }
}

impl<W: Write + Send> SessionReporter for ConsoleReporter<W> {
    fn on_question(
        &self,
        index: usize,
        question: &Question,
        options: &[AnswerOption<'_>],
        time_limit: Duration,
    ) {
        self.emit(|out| {
            writeln!(out)?;
            writeln!(out, "Question {}: {}", index + 1, question.question)?;
            writeln!(
                out,
                "Enter the correct option ({}s to answer):",
                time_limit.as_secs()
            )?;
            for option in options {
                writeln!(out, "{option}")?;
            }
            write!(out, "Pick an option: ")
        });
    }

    fn on_answer(&self, question: &Question, _letter: char, correct: bool) {
        if !self.show_answers {
            return;
        }
        self.emit(|out| {
            if correct {
                writeln!(out, "Correct!")?;
            } else {
                let letters: Vec<String> = question
                    .correct_letters()
                    .iter()
                    .map(char::to_string)
                    .collect();
                writeln!(out, "Wrong. Correct option: {}", letters.join(", "))?;
            }
            if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.is_empty()) {
                writeln!(out, "{explanation}")?;
            }
            Ok(())
        });
    }

    fn on_timeout(&self, _question: &Question) {
        self.emit(|out| {
            writeln!(out)?;
            writeln!(out, "Time's up!")
        });
    }

    fn on_finish(&self, result: &QuizResult, _end: &SessionEnd) {
        self.emit(|out| {
            writeln!(out)?;
            writeln!(out, "You scored {} out of {}.", result.score, result.total)
        });
    }
}
