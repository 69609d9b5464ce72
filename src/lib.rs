//! # trivia-lock
//!
//! A terminal trivia minigame: answer enough questions correctly to open the
//! lock before the round runs out of questions.
//!
//! The round logic lives in [`QuizRound`] and can be driven without the
//! terminal front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_lock::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("questions.json", Settings::default())?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
pub mod round;
pub mod schedule;
mod settings;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{AnswerEvent, App, LOCK_STAGES};
pub use data::{DEFAULT_QUESTIONS_PATH, LoadError, load_questions_from_json, parse_questions};
pub use models::{AnswerKey, AppState, CHOICE_COUNT, Question, QuestionMode};
pub use round::{AnswerResult, ConfigError, EndReason, Phase, QuizRound, RoundConfig, RoundOutcome};
pub use schedule::{Effect, Scheduler, Transition, TransitionKind};
pub use settings::{Settings, Timing};

/// How long to wait for a key before checking for due transitions.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("Invalid question bank: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Validate `questions` and set up the first round.
    pub fn new(questions: Vec<Question>, settings: Settings) -> Result<Self, QuizError> {
        let round = match settings.seed {
            Some(seed) => QuizRound::with_seed(&questions, settings.round, seed)?,
            None => QuizRound::initialize(&questions, settings.round)?,
        };
        Ok(Self {
            app: App::new(round, settings.timing),
        })
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use trivia_lock::{Quiz, Settings};
    ///
    /// let quiz = Quiz::from_json("questions.json", Settings::default()).expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P, settings: Settings) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions, settings)
    }

    /// Run the quiz in the terminal until the player quits.
    ///
    /// Must be called from within a tokio runtime; question and restart
    /// delays are tokio timers.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    let (mut scheduler, mut transitions) = Scheduler::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        while let Ok(transition) = transitions.try_recv() {
            if let Some(effect) = app.apply_transition(transition) {
                scheduler.apply(effect);
            }
        }

        if !event::poll(POLL_INTERVAL)? {
            tokio::task::yield_now().await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_input(app, key.code) {
                Input::Quit => break,
                Input::Handled(Some(effect)) => scheduler.apply(effect),
                Input::Handled(None) => {}
            }
        }
    }

    scheduler.cancel();
    Ok(())
}

enum Input {
    Handled(Option<Effect>),
    Quit,
}

fn handle_input(app: &mut App, key: KeyCode) -> Input {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Input::Quit;
    }

    let effect = match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Question => handle_question_input(app, key),
        AppState::Feedback => None,
        AppState::GameOver => handle_game_over_input(app, key),
    };
    Input::Handled(effect)
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    if key == KeyCode::Enter {
        app.start_quiz();
    }
    None
}

fn handle_question_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            let count = app.displayed_question().map_or(0, Question::option_count);
            if index < count {
                app.answer_current(index)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn handle_game_over_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(app.restart()),
        _ => None,
    }
}
