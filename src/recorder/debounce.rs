//! Leading-edge debounce for the record button
//!
//! The first press goes through; presses that follow within the window of
//! the previous press are dropped. A press is also dropped while the
//! previous transition is still running.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Debounce state for toggle triggers
#[derive(Debug)]
pub struct ToggleGate {
    window: Duration,
    last_trigger: Option<Instant>,
    in_flight: bool,
}

impl ToggleGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_trigger: None,
            in_flight: false,
        }
    }

    /// Record a trigger at `now` and report whether it may proceed.
    ///
    /// Every trigger restarts the window, accepted or not.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        let quiet = self
            .last_trigger
            .map_or(true, |last| now.saturating_duration_since(last) >= self.window);
        self.last_trigger = Some(now);

        if quiet && !self.in_flight {
            self.in_flight = true;
            true
        } else {
            false
        }
    }

    fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

/// Held while an accepted transition runs; clears the in-flight flag on drop
pub struct GatePermit<'a> {
    gate: &'a Mutex<ToggleGate>,
}

impl<'a> GatePermit<'a> {
    pub fn acquire(gate: &'a Mutex<ToggleGate>, now: Instant) -> Option<Self> {
        if gate.lock().try_accept(now) {
            Some(Self { gate })
        } else {
            None
        }
    }
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.lock().finish();
    }
}
