use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use trivia_lock::round::{DEFAULT_MAX_QUESTIONS, DEFAULT_WIN_THRESHOLD};
use trivia_lock::{DEFAULT_QUESTIONS_PATH, Quiz, QuestionMode, RoundConfig, Settings, Timing};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// Questions asked per round
    #[arg(short, long, default_value_t = DEFAULT_MAX_QUESTIONS)]
    max_questions: usize,

    /// Correct answers needed to win a round
    #[arg(short, long, default_value_t = DEFAULT_WIN_THRESHOLD)]
    win_threshold: usize,

    /// Kind of questions in the bank
    #[arg(long, value_enum, default_value_t = Mode::MultipleChoice)]
    mode: Mode,

    /// Milliseconds answer feedback stays on screen
    #[arg(long, default_value_t = 1500)]
    question_delay_ms: u64,

    /// Milliseconds before a finished round restarts
    #[arg(long, default_value_t = 3000)]
    restart_delay_ms: u64,

    /// Stay on the game-over screen until `r` is pressed
    #[arg(long)]
    no_auto_restart: bool,

    /// Seed the question shuffle
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    MultipleChoice,
    TrueFalse,
}

impl From<Mode> for QuestionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::MultipleChoice => QuestionMode::MultipleChoice,
            Mode::TrueFalse => QuestionMode::TrueFalse,
        }
    }
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            round: RoundConfig::new(self.max_questions, self.win_threshold, self.mode.into()),
            timing: Timing {
                question_delay: Duration::from_millis(self.question_delay_ms),
                restart_delay: Duration::from_millis(self.restart_delay_ms),
                auto_restart: !self.no_auto_restart,
            },
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let quiz = match Quiz::from_json(&args.questions, args.settings()) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
