use thiserror::Error;

use crate::models::QuestionMode;

/// A question bank or round configuration that a round cannot start with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Question bank is empty")]
    EmptyBank,
    #[error("Question #{index} ('{text}') has {count} answers, expected exactly 4")]
    WrongAnswerCount {
        index: usize,
        text: String,
        count: usize,
    },
    #[error("Question #{index} ('{text}') has an invalid correct answer index: {correct}")]
    InvalidCorrectIndex {
        index: usize,
        text: String,
        correct: usize,
    },
    #[error("Question #{index} ('{text}') is not a {expected:?} question")]
    ModeMismatch {
        index: usize,
        text: String,
        expected: QuestionMode,
    },
    #[error("Rounds must ask at least one question")]
    ZeroMaxQuestions,
    #[error("Win threshold must be at least one correct answer")]
    ZeroWinThreshold,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("Round already ended, there is no current question")]
    OutOfRange,
}
