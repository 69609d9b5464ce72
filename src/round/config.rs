use serde::{Deserialize, Serialize};

use crate::models::{AnswerKey, CHOICE_COUNT, Question, QuestionMode};

use super::error::ConfigError;

pub const DEFAULT_MAX_QUESTIONS: usize = 5;
pub const DEFAULT_WIN_THRESHOLD: usize = 3;

/// Tunables for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// The shuffled bank is truncated to this many questions.
    pub max_questions: usize,
    /// Correct answers needed to win.
    pub win_threshold: usize,
    pub mode: QuestionMode,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            mode: QuestionMode::default(),
        }
    }
}

impl RoundConfig {
    pub fn new(max_questions: usize, win_threshold: usize, mode: QuestionMode) -> Self {
        Self {
            max_questions,
            win_threshold,
            mode,
        }
    }

    /// Checks the tunables and every question in `bank`.
    ///
    /// Reports the first problem found, in bank order.
    pub fn validate(&self, bank: &[Question]) -> Result<(), ConfigError> {
        if self.max_questions == 0 {
            return Err(ConfigError::ZeroMaxQuestions);
        }
        if self.win_threshold == 0 {
            return Err(ConfigError::ZeroWinThreshold);
        }
        if bank.is_empty() {
            return Err(ConfigError::EmptyBank);
        }

        for (index, question) in bank.iter().enumerate() {
            if question.mode() != self.mode {
                return Err(ConfigError::ModeMismatch {
                    index,
                    text: question.text.clone(),
                    expected: self.mode,
                });
            }

            if let AnswerKey::Choice {
                options,
                correct_answer,
            } = &question.key
            {
                if options.len() != CHOICE_COUNT {
                    return Err(ConfigError::WrongAnswerCount {
                        index,
                        text: question.text.clone(),
                        count: options.len(),
                    });
                }
                if *correct_answer >= CHOICE_COUNT {
                    return Err(ConfigError::InvalidCorrectIndex {
                        index,
                        text: question.text.clone(),
                        correct: *correct_answer,
                    });
                }
            }
        }

        Ok(())
    }
}
