//! The quiz round state machine.
//!
//! A [`QuizRound`] owns a shuffled, truncated copy of the question bank and
//! walks it one answer at a time:
//!
//! ```text
//! AwaitingAnswer --submit_answer--> Resolved --advance--> AwaitingAnswer
//!                                            \--advance--> RoundOver --restart--> AwaitingAnswer
//! ```
//!
//! Advancing is left to the caller so the presentation layer can show
//! feedback for a while before the next question appears.

mod config;
mod error;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::models::Question;

pub use config::{DEFAULT_MAX_QUESTIONS, DEFAULT_WIN_THRESHOLD, RoundConfig};
pub use error::{ConfigError, RoundError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer,
    /// The current question was answered and the position already moved on.
    Resolved,
    RoundOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Every question in the working queue was asked.
    Exhausted,
    /// The player reached the win threshold.
    ThresholdReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    /// Position of the answered question in the working queue.
    pub question_index: usize,
    pub selected_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

pub struct QuizRound {
    bank: Vec<Question>,
    queue: Vec<Question>,
    config: RoundConfig,
    position: usize,
    correct: usize,
    phase: Phase,
    round_id: Uuid,
    rng: StdRng,
}

impl QuizRound {
    /// Validate `bank` and start a round with an entropy-seeded shuffle.
    pub fn initialize(bank: &[Question], config: RoundConfig) -> Result<Self, ConfigError> {
        Self::with_rng(bank, config, StdRng::from_entropy())
    }

    /// Like [`QuizRound::initialize`], but every shuffle is reproducible.
    pub fn with_seed(bank: &[Question], config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(bank, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: &[Question], config: RoundConfig, rng: StdRng) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate(bank) {
            log::error!("Cannot start round: {}", err);
            return Err(err);
        }

        if config.win_threshold > config.max_questions.min(bank.len()) {
            warn!(
                "Win threshold {} exceeds the {} questions per round, the round cannot be won",
                config.win_threshold,
                config.max_questions.min(bank.len())
            );
        }

        let mut round = Self {
            bank: bank.to_vec(),
            queue: Vec::new(),
            config,
            position: 0,
            correct: 0,
            phase: Phase::AwaitingAnswer,
            round_id: Uuid::new_v4(),
            rng,
        };
        round.deal();
        Ok(round)
    }

    fn deal(&mut self) {
        let mut queue = self.bank.clone();
        shuffle(&mut queue, &mut self.rng);
        queue.truncate(self.config.max_questions);
        self.queue = queue;

        info!(
            "Round {} started with {} of {} questions, {} correct to win",
            self.round_id,
            self.queue.len(),
            self.bank.len(),
            self.config.win_threshold
        );
    }

    pub fn current_question(&self) -> Result<&Question, RoundError> {
        if self.is_round_over() {
            return Err(RoundError::OutOfRange);
        }
        self.queue.get(self.position).ok_or(RoundError::OutOfRange)
    }

    /// Score `selected` against the current question.
    ///
    /// Returns `None` without touching any state when an answer for this
    /// presentation was already taken or the round is over.
    pub fn submit_answer(&mut self, selected: usize) -> Option<AnswerResult> {
        if self.phase != Phase::AwaitingAnswer || self.is_round_over() {
            debug!(
                "Ignoring answer {} while {:?} at position {}",
                selected, self.phase, self.position
            );
            return None;
        }

        let question_index = self.position;
        let question = &self.queue[question_index];
        let correct_index = question.correct_index();
        let is_correct = selected == correct_index;

        let selected_text = question.option_text(selected).unwrap_or_default();
        if is_correct {
            info!("Correct! You selected: {}", selected_text);
        } else {
            info!(
                "Wrong! You selected: {}. Correct was: {}",
                selected_text,
                question.option_text(correct_index).unwrap_or_default()
            );
        }

        if is_correct {
            self.correct += 1;
        }
        self.position += 1;
        self.phase = Phase::Resolved;

        Some(AnswerResult {
            question_index,
            selected_index: selected,
            correct_index,
            is_correct,
        })
    }

    /// Move past a resolved answer, either to the next question or to the
    /// end of the round. Does nothing in any other phase.
    pub fn advance(&mut self) -> Phase {
        if self.phase != Phase::Resolved {
            return self.phase;
        }

        match self.end_reason() {
            Some(reason) => {
                self.phase = Phase::RoundOver;
                info!(
                    "Round over ({:?}): {}/{} correct, {}",
                    reason,
                    self.correct,
                    self.queue.len(),
                    if self.did_win() { "won" } else { "lost" }
                );
            }
            None => self.phase = Phase::AwaitingAnswer,
        }

        self.phase
    }

    pub fn is_round_over(&self) -> bool {
        self.position >= self.queue.len() || self.correct >= self.config.win_threshold
    }

    /// Only meaningful once [`QuizRound::is_round_over`] holds.
    pub fn did_win(&self) -> bool {
        self.correct >= self.config.win_threshold
    }

    /// Why the round ended. Running out of questions is checked first.
    pub fn end_reason(&self) -> Option<EndReason> {
        if self.position >= self.queue.len() {
            Some(EndReason::Exhausted)
        } else if self.correct >= self.config.win_threshold {
            Some(EndReason::ThresholdReached)
        } else {
            None
        }
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        if !self.is_round_over() {
            return None;
        }
        Some(if self.did_win() {
            RoundOutcome::Won
        } else {
            RoundOutcome::Lost
        })
    }

    /// Reshuffle a fresh copy of the bank and start over.
    pub fn restart(&mut self) {
        self.position = 0;
        self.correct = 0;
        self.phase = Phase::AwaitingAnswer;
        self.round_id = Uuid::new_v4();
        self.deal();
    }

    /// Stage of the lock indicator out of `stages`, one stage per correct
    /// answer. Hidden until the first correct answer.
    pub fn lock_stage(&self, stages: usize) -> Option<usize> {
        if self.correct == 0 || stages == 0 {
            return None;
        }
        Some((self.correct - 1).min(stages - 1))
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn queue(&self) -> &[Question] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Changes on every restart.
    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }
}

/// Fisher-Yates: swap each slot with a uniformly chosen slot at or after it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let n = items.len();
    for i in 0..n {
        let j = rng.gen_range(i..n);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionMode;

    fn bank(size: usize) -> Vec<Question> {
        (0..size)
            .map(|i| {
                Question::multiple_choice(
                    format!("Question {}", i),
                    ["a", "b", "c", "d"].map(String::from),
                    i % 4,
                )
            })
            .collect()
    }

    fn config(max_questions: usize, win_threshold: usize) -> RoundConfig {
        RoundConfig::new(max_questions, win_threshold, QuestionMode::MultipleChoice)
    }

    fn answer_correctly(round: &mut QuizRound) -> AnswerResult {
        let correct = round.current_question().unwrap().correct_index();
        let result = round.submit_answer(correct).unwrap();
        round.advance();
        result
    }

    fn answer_wrong(round: &mut QuizRound) -> AnswerResult {
        let wrong = (round.current_question().unwrap().correct_index() + 1) % 4;
        let result = round.submit_answer(wrong).unwrap();
        round.advance();
        result
    }

    fn sorted_texts(questions: &[Question]) -> Vec<String> {
        let mut texts: Vec<String> = questions.iter().map(|q| q.text.clone()).collect();
        texts.sort();
        texts
    }

    #[test]
    fn test_truncates_to_max_questions() {
        let bank = bank(12);
        for seed in 0..20 {
            let round = QuizRound::with_seed(&bank, config(5, 3), seed).unwrap();
            assert_eq!(round.len(), 5);

            let texts = sorted_texts(round.queue());
            let mut deduped = texts.clone();
            deduped.dedup();
            assert_eq!(texts, deduped);
            assert!(round.queue().iter().all(|q| bank.contains(q)));
        }
    }

    #[test]
    fn test_small_bank_is_a_permutation() {
        let bank = bank(3);
        let round = QuizRound::with_seed(&bank, config(5, 3), 7).unwrap();
        assert_eq!(round.len(), 3);
        assert_eq!(sorted_texts(round.queue()), sorted_texts(&bank));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());

        let mut empty: Vec<u32> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_correct_answer_counts_and_advances() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 1).unwrap();
        let result = answer_correctly(&mut round);
        assert!(result.is_correct);
        assert_eq!(result.question_index, 0);
        assert_eq!(round.correct_count(), 1);
        assert_eq!(round.position(), 1);
    }

    #[test]
    fn test_wrong_answer_only_advances() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 1).unwrap();
        let expected = round.current_question().unwrap().correct_index();
        let result = answer_wrong(&mut round);
        assert!(!result.is_correct);
        assert_eq!(result.correct_index, expected);
        assert_eq!(round.correct_count(), 0);
        assert_eq!(round.position(), 1);
    }

    #[test]
    fn test_out_of_range_selection_is_wrong() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 1).unwrap();
        let result = round.submit_answer(9).unwrap();
        assert!(!result.is_correct);
        assert_eq!(round.position(), 1);
    }

    #[test]
    fn test_three_correct_wins_early() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 3).unwrap();
        answer_correctly(&mut round);
        answer_correctly(&mut round);
        assert!(!round.is_round_over());

        let correct = round.current_question().unwrap().correct_index();
        round.submit_answer(correct).unwrap();
        assert!(round.is_round_over());
        assert!(round.did_win());
        assert_eq!(round.position(), 3);
        assert_eq!(round.end_reason(), Some(EndReason::ThresholdReached));

        assert_eq!(round.advance(), Phase::RoundOver);
        assert_eq!(round.outcome(), Some(RoundOutcome::Won));
        assert_eq!(round.current_question(), Err(RoundError::OutOfRange));
    }

    #[test]
    fn test_all_wrong_loses() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 3).unwrap();
        for _ in 0..5 {
            assert!(!round.is_round_over());
            answer_wrong(&mut round);
        }
        assert!(round.is_round_over());
        assert!(!round.did_win());
        assert_eq!(round.phase(), Phase::RoundOver);
        assert_eq!(round.end_reason(), Some(EndReason::Exhausted));
        assert_eq!(round.outcome(), Some(RoundOutcome::Lost));
    }

    #[test]
    fn test_win_on_last_question_reports_exhaustion_first() {
        let mut round = QuizRound::with_seed(&bank(3), config(3, 3), 5).unwrap();
        for _ in 0..3 {
            answer_correctly(&mut round);
        }
        assert_eq!(round.end_reason(), Some(EndReason::Exhausted));
        assert!(round.did_win());
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 9).unwrap();
        assert!(round.submit_answer(0).is_some());
        assert_eq!(round.phase(), Phase::Resolved);
        assert!(round.submit_answer(0).is_none());
        assert_eq!(round.position(), 1);
    }

    #[test]
    fn test_submit_after_end_is_ignored() {
        let mut round = QuizRound::with_seed(&bank(2), config(2, 2), 9).unwrap();
        answer_wrong(&mut round);
        answer_wrong(&mut round);
        assert_eq!(round.phase(), Phase::RoundOver);
        assert!(round.submit_answer(0).is_none());
        assert_eq!(round.position(), 2);
        assert_eq!(round.advance(), Phase::RoundOver);
    }

    #[test]
    fn test_advance_without_answer_is_noop() {
        let mut round = QuizRound::with_seed(&bank(5), config(5, 3), 9).unwrap();
        assert_eq!(round.advance(), Phase::AwaitingAnswer);
        assert_eq!(round.position(), 0);
    }

    #[test]
    fn test_restart_resets_and_reshuffles() {
        let bank = bank(8);
        let mut round = QuizRound::with_seed(&bank, config(8, 8), 11).unwrap();
        answer_correctly(&mut round);
        answer_wrong(&mut round);

        let first_order: Vec<String> = round.queue().iter().map(|q| q.text.clone()).collect();
        let first_id = round.round_id();

        let mut saw_new_order = false;
        for _ in 0..20 {
            round.restart();
            assert_eq!(round.position(), 0);
            assert_eq!(round.correct_count(), 0);
            assert_eq!(round.phase(), Phase::AwaitingAnswer);
            assert!(!round.is_round_over());
            assert_eq!(sorted_texts(round.queue()), sorted_texts(&bank));

            let order: Vec<String> = round.queue().iter().map(|q| q.text.clone()).collect();
            saw_new_order |= order != first_order;
        }
        assert!(saw_new_order);
        assert_ne!(round.round_id(), first_id);
    }

    #[test]
    fn test_missing_answer_fails_before_start() {
        let mut bank = bank(5);
        bank[2] = Question::multiple_choice("Short", ["a", "b", "c"], 0);
        assert!(matches!(
            QuizRound::initialize(&bank, config(5, 3)),
            Err(ConfigError::WrongAnswerCount { count: 3, .. })
        ));
        assert!(matches!(
            QuizRound::initialize(&[], config(5, 3)),
            Err(ConfigError::EmptyBank)
        ));
    }

    #[test]
    fn test_lock_stage() {
        let mut round = QuizRound::with_seed(&bank(8), config(8, 8), 2).unwrap();
        assert_eq!(round.lock_stage(5), None);
        answer_correctly(&mut round);
        assert_eq!(round.lock_stage(5), Some(0));
        answer_wrong(&mut round);
        assert_eq!(round.lock_stage(5), Some(0));
        for _ in 0..6 {
            answer_correctly(&mut round);
        }
        assert_eq!(round.correct_count(), 7);
        assert_eq!(round.lock_stage(5), Some(4));
        assert_eq!(round.lock_stage(0), None);
    }

    #[test]
    fn test_true_false_round() {
        let bank = vec![
            Question::true_false("Water is wet", true),
            Question::true_false("The sun is cold", false),
        ];
        let config = RoundConfig::new(2, 2, QuestionMode::TrueFalse);
        let mut round = QuizRound::with_seed(&bank, config, 4).unwrap();
        answer_correctly(&mut round);
        answer_correctly(&mut round);
        assert_eq!(round.outcome(), Some(RoundOutcome::Won));
    }
}
