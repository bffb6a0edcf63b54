//! quizrun CLI: timed trivia quiz in the terminal.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizrun_source::ConfigLayer;

mod console;
mod quiz;

#[derive(Parser)]
#[command(
    name = "quizrun",
    version,
    about = "Timed multiple-choice quiz backed by QuizAPI"
)]
struct Cli {
    /// Your QuizAPI key [default: $API_KEY]
    #[arg(short = 'a', long)]
    api_key: Option<String>,

    /// Category (Linux, DevOps, Networking, Programming, Cloud, Docker, Kubernetes)
    #[arg(short, long)]
    category: Option<String>,

    /// Difficulty (Easy, Medium, Hard)
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Number of questions [default: 1]
    #[arg(short, long)]
    limit: Option<u32>,

    /// Seconds allowed per question [default: 30]
    #[arg(short, long)]
    time_limit: Option<u64>,

    /// Question API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Settings file with KEY=value lines
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON session report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// After each answer, say whether it was right and show the explanation
    #[arg(long)]
    show_answers: bool,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never interleave with the quiz prompt.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizrun=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let args = quiz::QuizArgs {
        flags: ConfigLayer {
            api_key: cli.api_key,
            base_url: cli.base_url,
            category: cli.category,
            difficulty: cli.difficulty,
            limit: cli.limit,
            time_limit_secs: cli.time_limit,
        },
        env_file: cli.env_file,
        config_path: cli.config,
        report_path: cli.report,
        show_answers: cli.show_answers,
    };

    if let Err(e) = quiz::execute(args).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
