//! Debounce gate
//!
//! Holds the latest raw value and the last settled value. A change to the
//! raw value arms a deadline; the value settles once the deadline passes
//! without another change. The gate is driven by the caller's clock
//! (`now`), so it works from the UI tick loop and in tests without timers.
//! Dropping the gate is the only way to cancel a pending transition.

use std::time::{Duration, Instant};

/// Quiescence window used by the search screen
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// A raw change is waiting for the window to elapse
    Pending,
    /// The settled value is the latest raw value
    Settled,
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    raw: T,
    settled: T,
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Start settled on `initial`
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            window,
            raw: initial.clone(),
            settled: initial,
            deadline: None,
        }
    }

    /// Latest value passed to `update`
    pub fn raw(&self) -> &T {
        &self.raw
    }

    /// Last value that survived the window
    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn state(&self) -> DebounceState {
        if self.deadline.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Settled
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending value will settle, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a raw change. Restarts the window while pending.
    ///
    /// Returning to the settled value disarms the gate: there is nothing
    /// left to commit.
    pub fn update(&mut self, value: T, now: Instant) {
        if value == self.raw {
            return;
        }
        self.raw = value;

        if self.raw == self.settled {
            self.deadline = None;
        } else {
            self.deadline = Some(now + self.window);
        }
    }

    /// Settle if the window has elapsed. Returns the new settled value
    /// exactly once per settle.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => Some(self.commit()),
            _ => None,
        }
    }

    /// Settle immediately (e.g. on Enter) if anything is pending
    pub fn flush(&mut self) -> Option<T> {
        self.deadline.map(|_| self.commit())
    }

    fn commit(&mut self) -> T {
        self.deadline = None;
        self.settled = self.raw.clone();
        self.settled.clone()
    }
}
