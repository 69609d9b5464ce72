use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Number of answers every multiple-choice question must carry.
pub const CHOICE_COUNT: usize = 4;

const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(flatten)]
    pub key: AnswerKey,
}

/// How a question is answered and which answer is right.
///
/// Multiple-choice options are kept as a plain list so that a malformed bank
/// still loads and is rejected by round validation with a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Choice {
        options: Vec<String>,
        correct_answer: usize,
    },
    TrueFalse {
        is_true: bool,
    },
}

/// The kind of questions a round is played with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionMode {
    #[default]
    MultipleChoice,
    TrueFalse,
}

impl Question {
    pub fn multiple_choice<S: Into<String>>(
        text: S,
        options: impl IntoIterator<Item = S>,
        correct_answer: usize,
    ) -> Self {
        Self {
            text: text.into(),
            code: None,
            key: AnswerKey::Choice {
                options: options.into_iter().map(Into::into).collect(),
                correct_answer,
            },
        }
    }

    pub fn true_false<S: Into<String>>(text: S, is_true: bool) -> Self {
        Self {
            text: text.into(),
            code: None,
            key: AnswerKey::TrueFalse { is_true },
        }
    }

    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn mode(&self) -> QuestionMode {
        match self.key {
            AnswerKey::Choice { .. } => QuestionMode::MultipleChoice,
            AnswerKey::TrueFalse { .. } => QuestionMode::TrueFalse,
        }
    }

    /// Index of the right answer among [`Question::options`].
    ///
    /// True/false questions present "True" at 0 and "False" at 1.
    pub fn correct_index(&self) -> usize {
        match self.key {
            AnswerKey::Choice { correct_answer, .. } => correct_answer,
            AnswerKey::TrueFalse { is_true: true } => 0,
            AnswerKey::TrueFalse { is_true: false } => 1,
        }
    }

    pub fn options(&self) -> Vec<Cow<'_, str>> {
        match &self.key {
            AnswerKey::Choice { options, .. } => {
                options.iter().map(|o| Cow::Borrowed(o.as_str())).collect()
            }
            AnswerKey::TrueFalse { .. } => TRUE_FALSE_OPTIONS
                .iter()
                .map(|o| Cow::Borrowed(*o))
                .collect(),
        }
    }

    pub fn option_count(&self) -> usize {
        match &self.key {
            AnswerKey::Choice { options, .. } => options.len(),
            AnswerKey::TrueFalse { .. } => TRUE_FALSE_OPTIONS.len(),
        }
    }

    pub fn option_text(&self, index: usize) -> Option<Cow<'_, str>> {
        self.options().into_iter().nth(index)
    }
}
