// SPDX-License-Identifier: MPL-2.0
//! Auto-re-pause decision after advance inputs.
//!
//! Each accepted input lets playback run for a short hold window. Once the
//! window elapses with no further input, playback should pause again until
//! the next input. The debouncer only remembers the last input time and
//! whether an advance is still in flight; the controller owns the pause.

use std::time::{Duration, Instant};

/// Tracks the most recent advance input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputDebouncer {
    last_input: Option<Instant>,
    in_flight: bool,
}

impl InputDebouncer {
    /// Creates a debouncer that has never seen an input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted input and arms the auto-re-pause.
    pub fn record_input(&mut self, now: Instant) {
        self.last_input = Some(now);
        self.in_flight = true;
    }

    /// Returns true if playback should pause again.
    ///
    /// That is the case when an advance is in flight and more than
    /// `hold_window` has passed since the last input.
    #[must_use]
    pub fn should_auto_pause(&self, now: Instant, hold_window: Duration) -> bool {
        match self.last_input {
            Some(last) if self.in_flight => now.saturating_duration_since(last) > hold_window,
            _ => false,
        }
    }

    /// Marks the in-flight advance as paused, keeping the last input time.
    pub fn settle(&mut self) {
        self.in_flight = false;
    }

    /// Forgets everything. Used at session start and once pacing ends.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the time of the last accepted input, if any.
    #[must_use]
    pub fn last_input(&self) -> Option<Instant> {
        self.last_input
    }

    /// Returns true while playback runs on behalf of a recent input.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
