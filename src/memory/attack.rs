//! Time-bounded attack window
//!
//! The window is a stored start time plus a fixed duration, checked against
//! the clock on every read. There is no background timer: expiry happens by
//! comparison, so a second declaration can never race a pending expiry.

use std::time::Duration;

use crate::core::types::Timestamp;

#[derive(Debug, Clone)]
pub struct AttackWindow {
    duration: Duration,
    started_at: Option<Timestamp>,
    /// Number of windows ever opened
    windows_started: u32,
}

impl AttackWindow {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            windows_started: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        self.expires_at().is_some_and(|end| now < end)
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.started_at.map(|start| start.after(self.duration))
    }

    /// Open a window at `now`. No-op (returns false) while one is active.
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.is_active(now) {
            return false;
        }
        self.started_at = Some(now);
        self.windows_started += 1;
        true
    }

    /// Retire an elapsed window. Returns true only when a window was retired
    /// by this call; an already cleared window is left alone.
    pub fn expire(&mut self, now: Timestamp) -> bool {
        match self.started_at {
            Some(_) if !self.is_active(now) => {
                self.started_at = None;
                true
            }
            _ => false,
        }
    }

    /// Close the window early
    pub fn clear(&mut self) {
        self.started_at = None;
    }

    pub fn windows_started(&self) -> u32 {
        self.windows_started
    }
}
