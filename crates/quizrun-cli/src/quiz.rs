//! Fetch questions, run the timed session, report the score.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use quizrun_core::input::StdinInput;
use quizrun_core::session::{QuizSession, SessionEnd, SessionReporter, SessionSummary};
use quizrun_core::traits::{AnswerInput, QuestionSource};
use quizrun_source::config::{load_config_from, load_env_file, ConfigLayer, QuizConfig};
use quizrun_source::QuizApiClient;

use crate::console::ConsoleReporter;

/// Everything the command line contributes.
pub struct QuizArgs {
    /// Settings given as flags; highest precedence.
    pub flags: ConfigLayer,
    pub env_file: PathBuf,
    pub config_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub show_answers: bool,
}

pub async fn execute(args: QuizArgs) -> Result<()> {
    load_env_file(&args.env_file);
    let file_layer = load_config_from(args.config_path.as_deref())?;
    let config = args
        .flags
        .merge(ConfigLayer::from_env())
        .merge(file_layer)
        .resolve()?;
    debug!(?config, "configuration resolved");

    let source = QuizApiClient::new(&config.api_key, Some(config.base_url.clone()))?;
    let reporter = ConsoleReporter::stdout(args.show_answers);

    let summary = play(&source, Arc::new(StdinInput), &config, &reporter).await?;

    if let Some(path) = &args.report_path {
        summary.report.save_json(path)?;
        info!(path = %path.display(), "session report written");
    }

    match summary.end {
        SessionEnd::Aborted(e) => Err(e.into()),
        SessionEnd::Completed | SessionEnd::TimedOut { .. } => Ok(()),
    }
}

/// Fetch questions from `source` and run one session over them.
pub async fn play(
    source: &dyn QuestionSource,
    input: Arc<dyn AnswerInput>,
    config: &QuizConfig,
    reporter: &dyn SessionReporter,
) -> Result<SessionSummary> {
    let questions = source.fetch(&config.query()).await?;
    info!(
        source = source.name(),
        count = questions.len(),
        "questions fetched"
    );

    let session = QuizSession::new(input, config.session());
    Ok(session.run(&questions, reporter).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    use quizrun_core::error::CollectError;
    use quizrun_core::input::ReaderInput;
    use quizrun_core::model::Question;
    use quizrun_core::session::NoopReporter;
    use quizrun_source::mock::MockSource;

    fn question(id: u64, correct: char) -> Question {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "question": format!("question {id}"),
            "answers": {"answer_a": "yes", "answer_b": "no"},
            "correct_answers": {
                format!("answer_{correct}_correct"): "true"
            }
        }))
        .unwrap()
    }

    fn config(limit: u32) -> QuizConfig {
        ConfigLayer {
            api_key: Some("test".into()),
            category: Some("Linux".into()),
            limit: Some(limit),
            time_limit_secs: Some(5),
            ..ConfigLayer::default()
        }
        .resolve()
        .unwrap()
    }

    fn input(text: &'static str) -> Arc<dyn AnswerInput> {
        Arc::new(ReaderInput::new(Cursor::new(text)))
    }

    #[tokio::test]
    async fn play_scores_answers() {
        let source = MockSource::new(vec![question(1, 'a'), question(2, 'b')]);
        let reporter = ConsoleReporter::new(Vec::new(), false);

        let summary = play(&source, input("a\na\n"), &config(2), &reporter)
            .await
            .unwrap();

        assert!(matches!(summary.end, SessionEnd::Completed));
        assert_eq!(summary.result.score, 1);
        let query = source.last_query().unwrap();
        assert_eq!(query.category.as_deref(), Some("Linux"));
        assert_eq!(query.limit, 2);

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.ends_with("You scored 1 out of 2.\n"));
    }

    #[tokio::test]
    async fn play_reports_invalid_input() {
        let source = MockSource::new(vec![question(1, 'a'), question(2, 'b')]);

        let summary = play(&source, input("a\nxyz\n"), &config(2), &NoopReporter)
            .await
            .unwrap();

        assert!(matches!(
            summary.end,
            SessionEnd::Aborted(CollectError::InvalidInput(_))
        ));
        assert_eq!(summary.result.score, 1);
    }

    #[tokio::test]
    async fn play_fails_without_questions() {
        let source = MockSource::new(vec![]);
        let err = play(&source, input("a\n"), &config(1), &NoopReporter)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No questions found"));
    }

    #[test]
    fn config_time_limit_reaches_session() {
        assert_eq!(config(1).session().time_limit, Duration::from_secs(5));
    }
}
