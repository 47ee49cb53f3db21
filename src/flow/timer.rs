//! Deferred flow events and the virtual clock that delivers them.

use std::{collections::BTreeMap, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second of the resend cooldown elapsed.
    ResendTick,
    /// Drop the red border from the code cells.
    HighlightRevert,
}

/// Source of deferred events for the controller. Events are pulled one at a
/// time so that handlers rescheduling from inside a delivery are measured
/// from the deadline that fired, not from the end of the advance.
pub trait Scheduler {
    /// Time since the scheduler started.
    fn now(&self) -> Duration;

    /// Deliver `event` once `delay` has elapsed from `now()`.
    fn schedule(&mut self, delay: Duration, event: TimerEvent);

    /// Absolute time of the earliest pending event.
    fn next_deadline(&self) -> Option<Duration>;

    /// Pop the earliest event due at or before `until`, moving the clock to
    /// its deadline. Ties come out in scheduling order.
    fn pop_due(&mut self, until: Duration) -> Option<TimerEvent>;

    /// Move the clock to `until`. The clock never goes backwards.
    fn settle(&mut self, until: Duration);
}

/// Scheduler on a manually advanced clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), TimerEvent>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.seq += 1;
        self.pending.insert((self.now + delay, self.seq), event);
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    fn pop_due(&mut self, until: Duration) -> Option<TimerEvent> {
        let (&key, _) = self.pending.iter().next()?;
        if key.0 > until {
            return None;
        }
        self.now = self.now.max(key.0);
        self.pending.remove(&key)
    }

    fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
