//! Two-step delete: the first press arms, a second press inside the window
//! confirms. An armed confirmation that is not followed up resets on its own.

use std::time::{Duration, Instant};

pub const DEFAULT_CONFIRM_WINDOW: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// First press; waiting for the confirming press.
    Armed,
    /// Second press within the window; go ahead and delete.
    Confirmed,
}

#[derive(Debug, Clone)]
pub struct DeleteConfirmation {
    window: Duration,
    armed_at: Option<Instant>,
}

impl DeleteConfirmation {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed_at: None,
        }
    }

    pub fn press(&mut self, now: Instant) -> ConfirmOutcome {
        if self.is_armed(now) {
            self.armed_at = None;
            ConfirmOutcome::Confirmed
        } else {
            self.armed_at = Some(now);
            ConfirmOutcome::Armed
        }
    }

    /// Armed and the window has not elapsed yet.
    pub fn is_armed(&self, now: Instant) -> bool {
        self.armed_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.window)
    }

    /// When the current arming lapses, if armed.
    pub fn expires_at(&self) -> Option<Instant> {
        self.armed_at.map(|at| at + self.window)
    }

    pub fn reset(&mut self) {
        self.armed_at = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_WINDOW)
    }
}
