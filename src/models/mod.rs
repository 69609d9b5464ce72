mod question;

pub use question::{AnswerKey, CHOICE_COUNT, Question, QuestionMode};

/// Which screen the terminal front end is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    /// Waiting for the player to pick an answer.
    Question,
    /// An answer was resolved; the next question is on a timer.
    Feedback,
    GameOver,
}
