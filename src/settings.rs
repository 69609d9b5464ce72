use std::time::Duration;

use crate::round::RoundConfig;

pub const DEFAULT_QUESTION_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_millis(3000);

/// Presentation delays between round transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long answer feedback stays up before the next question.
    pub question_delay: Duration,
    /// How long the game-over screen stays up before a new round.
    pub restart_delay: Duration,
    pub auto_restart: bool,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            question_delay: DEFAULT_QUESTION_DELAY,
            restart_delay: DEFAULT_RESTART_DELAY,
            auto_restart: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub round: RoundConfig,
    pub timing: Timing,
    /// Fixed shuffle seed, mostly useful for demos and debugging.
    pub seed: Option<u64>,
}
