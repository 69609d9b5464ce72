use std::time::Instant;

use log::debug;

use crate::models::{AppState, Question};
use crate::round::{AnswerResult, Phase, QuizRound};
use crate::schedule::{Effect, Transition, TransitionKind};
use crate::settings::Timing;

/// Number of stages the lock indicator fills, one per correct answer.
pub const LOCK_STAGES: usize = 5;

/// A player picking `answer_index` on the question shown at `question_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerEvent {
    pub question_index: usize,
    pub answer_index: usize,
}

pub struct App {
    pub state: AppState,
    round: QuizRound,
    timing: Timing,
    selected_option: usize,
    last_result: Option<AnswerResult>,
    restart_at: Option<Instant>,
}

impl App {
    pub fn new(round: QuizRound, timing: Timing) -> Self {
        Self {
            state: AppState::Welcome,
            round,
            timing,
            selected_option: 0,
            last_result: None,
            restart_at: None,
        }
    }

    pub fn round(&self) -> &QuizRound {
        &self.round
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The question on screen: the pending one, or the one whose answer is
    /// being shown as feedback.
    pub fn displayed_question(&self) -> Option<&Question> {
        match (self.state, self.last_result) {
            (AppState::Feedback, Some(result)) => self.round.queue().get(result.question_index),
            (AppState::Question, _) => self.round.current_question().ok(),
            _ => None,
        }
    }

    pub fn current_question_number(&self) -> usize {
        match (self.state, self.last_result) {
            (AppState::Feedback, Some(result)) => result.question_index + 1,
            _ => self.round.position() + 1,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.round.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn last_result(&self) -> Option<AnswerResult> {
        self.last_result
    }

    pub fn lock_stage(&self) -> Option<usize> {
        self.round.lock_stage(LOCK_STAGES)
    }

    /// When the pending automatic restart fires, if one is scheduled.
    pub fn restart_at(&self) -> Option<Instant> {
        self.restart_at
    }

    fn option_count(&self) -> usize {
        self.displayed_question()
            .map(Question::option_count)
            .unwrap_or(1)
            .max(1)
    }

    pub fn select_next_option(&mut self) {
        if self.state != AppState::Question {
            return;
        }
        self.selected_option = (self.selected_option + 1) % self.option_count();
    }

    pub fn select_previous_option(&mut self) {
        if self.state != AppState::Question {
            return;
        }
        let count = self.option_count();
        self.selected_option = (self.selected_option + count - 1) % count;
    }

    pub fn start_quiz(&mut self) {
        if self.state == AppState::Welcome {
            self.state = AppState::Question;
        }
    }

    /// Answer the current question with the highlighted option.
    pub fn submit_answer(&mut self) -> Option<Effect> {
        self.answer_current(self.selected_option)
    }

    /// Answer the current question with `answer_index` directly.
    pub fn answer_current(&mut self, answer_index: usize) -> Option<Effect> {
        self.answer(AnswerEvent {
            question_index: self.round.position(),
            answer_index,
        })
    }

    pub fn answer(&mut self, event: AnswerEvent) -> Option<Effect> {
        if self.state != AppState::Question {
            debug!("Ignoring {:?} outside of a question", event);
            return None;
        }
        if event.question_index != self.round.position() {
            debug!(
                "Ignoring stale {:?}, current question is {}",
                event,
                self.round.position()
            );
            return None;
        }

        let result = self.round.submit_answer(event.answer_index)?;
        self.last_result = Some(result);
        self.selected_option = event.answer_index;
        self.state = AppState::Feedback;

        Some(Effect::Schedule {
            delay: self.timing.question_delay,
            transition: Transition::advance(self.round.round_id()),
        })
    }

    /// Apply a transition delivered by the scheduler.
    ///
    /// Transitions scheduled for an earlier round are dropped.
    pub fn apply_transition(&mut self, transition: Transition) -> Option<Effect> {
        if transition.round_id != self.round.round_id() {
            debug!("Dropping {:?} for a finished round", transition.kind);
            return None;
        }

        match transition.kind {
            TransitionKind::Advance => match self.round.advance() {
                Phase::AwaitingAnswer => {
                    self.state = AppState::Question;
                    self.selected_option = 0;
                    self.last_result = None;
                    None
                }
                Phase::RoundOver => {
                    self.state = AppState::GameOver;
                    self.last_result = None;
                    if !self.timing.auto_restart {
                        return None;
                    }
                    self.restart_at = Some(Instant::now() + self.timing.restart_delay);
                    Some(Effect::Schedule {
                        delay: self.timing.restart_delay,
                        transition: Transition::restart(self.round.round_id()),
                    })
                }
                Phase::Resolved => None,
            },
            TransitionKind::Restart => {
                self.restart_round();
                None
            }
        }
    }

    /// Start over right away, dropping any pending transition.
    pub fn restart(&mut self) -> Effect {
        self.restart_round();
        Effect::Cancel
    }

    fn restart_round(&mut self) {
        self.round.restart();
        self.state = AppState::Question;
        self.selected_option = 0;
        self.last_result = None;
        self.restart_at = None;
    }
}
