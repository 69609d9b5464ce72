//! Deferred round transitions.
//!
//! The round never waits on its own. After an answer is resolved the front
//! end asks the [`Scheduler`] to deliver a [`Transition`] later; the event
//! loop picks it up from the channel and feeds it back to the app.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Show the next question, or the game-over screen.
    Advance,
    Restart,
}

/// A transition addressed to one specific round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub round_id: Uuid,
    pub kind: TransitionKind,
}

impl Transition {
    pub fn advance(round_id: Uuid) -> Self {
        Self {
            round_id,
            kind: TransitionKind::Advance,
        }
    }

    pub fn restart(round_id: Uuid) -> Self {
        Self {
            round_id,
            kind: TransitionKind::Restart,
        }
    }
}

/// Scheduling work requested by the app in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Schedule {
        delay: Duration,
        transition: Transition,
    },
    /// Drop whatever transition is still pending.
    Cancel,
}

/// Single-slot timer: at most one transition is in flight.
pub struct Scheduler {
    sender: mpsc::UnboundedSender<Transition>,
    pending: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Transition>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                pending: None,
            },
            receiver,
        )
    }

    /// Deliver `transition` after `delay`, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, transition: Transition) {
        self.cancel();

        let sender = self.sender.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the event loop already exited.
            let _ = sender.send(transition);
        }));
        log::debug!("Scheduled {:?} in {:?}", transition.kind, delay);
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule { delay, transition } => self.schedule(delay, transition),
            Effect::Cancel => self.cancel(),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (mut scheduler, mut rx) = Scheduler::new();
        let transition = Transition::advance(Uuid::new_v4());
        let start = Instant::now();

        scheduler.schedule(Duration::from_millis(1500), transition);
        assert!(scheduler.is_pending());

        assert_eq!(rx.recv().await, Some(transition));
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_delay() {
        let (mut scheduler, mut rx) = Scheduler::new();
        scheduler.schedule(Duration::from_secs(2), Transition::advance(Uuid::new_v4()));

        let early = timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(early.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_pending() {
        let (mut scheduler, mut rx) = Scheduler::new();
        let round_id = Uuid::new_v4();

        scheduler.schedule(Duration::from_secs(1), Transition::advance(round_id));
        scheduler.schedule(Duration::from_secs(2), Transition::restart(round_id));

        assert_eq!(rx.recv().await, Some(Transition::restart(round_id)));
        let more = timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(more.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_effect() {
        let (mut scheduler, mut rx) = Scheduler::new();
        scheduler.apply(Effect::Schedule {
            delay: Duration::from_secs(1),
            transition: Transition::advance(Uuid::new_v4()),
        });
        scheduler.apply(Effect::Cancel);
        assert!(!scheduler.is_pending());

        let delivered = timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(delivered.is_err());
    }
}
