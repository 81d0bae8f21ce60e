// SPDX-License-Identifier: MPL-2.0
//! Pacing newtypes.
//!
//! This module provides type-safe wrappers for pacing values,
//! ensuring they are always within valid ranges.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// MinimumStep
// =============================================================================

/// Minimum step bounds (0.01 to 10.0 seconds).
pub mod minimum_step_bounds {
    /// Smallest step floor in seconds.
    pub const MIN: f64 = 0.01;
    /// Largest step floor in seconds.
    pub const MAX: f64 = 10.0;
    /// Default step floor in seconds.
    pub const DEFAULT: f64 = 0.08;
}

/// Floor for the time advanced by one input, in seconds.
///
/// Keeps a single input visible on screen even when the remaining span
/// divided by the required count would be tiny.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct MinimumStep(f64);

impl MinimumStep {
    /// Creates a new minimum step, clamping to valid range.
    ///
    /// Non-finite values fall back to the default.
    #[must_use]
    pub fn new(secs: f64) -> Self {
        if !secs.is_finite() {
            return Self::default();
        }
        Self(secs.clamp(minimum_step_bounds::MIN, minimum_step_bounds::MAX))
    }

    /// Returns the value as f64 seconds.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if this is the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= minimum_step_bounds::MIN
    }

    /// Returns true if this is the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= minimum_step_bounds::MAX
    }
}

impl Default for MinimumStep {
    fn default() -> Self {
        Self(minimum_step_bounds::DEFAULT)
    }
}

impl From<f64> for MinimumStep {
    fn from(secs: f64) -> Self {
        Self::new(secs)
    }
}

impl From<MinimumStep> for f64 {
    fn from(step: MinimumStep) -> Self {
        step.0
    }
}

// =============================================================================
// HoldWindow
// =============================================================================

/// Hold window bounds (10 ms to 5 s).
pub mod hold_window_bounds {
    /// Minimum hold window in milliseconds.
    pub const MIN: u64 = 10;
    /// Maximum hold window in milliseconds.
    pub const MAX: u64 = 5_000;
    /// Default hold window in milliseconds.
    pub const DEFAULT: u64 = 120;
}

/// How long playback keeps running after an input before it re-pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct HoldWindow(u64);

impl HoldWindow {
    /// Creates a new hold window in milliseconds, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(hold_window_bounds::MIN, hold_window_bounds::MAX))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for HoldWindow {
    fn default() -> Self {
        Self(hold_window_bounds::DEFAULT)
    }
}

impl From<u64> for HoldWindow {
    fn from(millis: u64) -> Self {
        Self::new(millis)
    }
}

impl From<HoldWindow> for u64 {
    fn from(window: HoldWindow) -> Self {
        window.0
    }
}

// =============================================================================
// PollInterval
// =============================================================================

/// Poll interval bounds (1 ms to 500 ms).
pub mod poll_interval_bounds {
    /// Minimum poll interval in milliseconds.
    pub const MIN: u64 = 1;
    /// Maximum poll interval in milliseconds.
    pub const MAX: u64 = 500;
    /// Default poll interval in milliseconds (roughly one frame at 60 Hz).
    pub const DEFAULT: u64 = 16;
}

/// Interval between position polls while looking for the checkpoint.
///
/// The checkpoint is detected at most one interval late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct PollInterval(u64);

impl PollInterval {
    /// Creates a new poll interval in milliseconds, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(poll_interval_bounds::MIN, poll_interval_bounds::MAX))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the interval as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self(poll_interval_bounds::DEFAULT)
    }
}

impl From<u64> for PollInterval {
    fn from(millis: u64) -> Self {
        Self::new(millis)
    }
}

impl From<PollInterval> for u64 {
    fn from(interval: PollInterval) -> Self {
        interval.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DEFAULT_HOLD_WINDOW_MS, DEFAULT_MINIMUM_STEP_SECS, DEFAULT_POLL_INTERVAL_MS,
        MAX_HOLD_WINDOW_MS, MAX_MINIMUM_STEP_SECS, MAX_POLL_INTERVAL_MS, MIN_HOLD_WINDOW_MS,
        MIN_MINIMUM_STEP_SECS, MIN_POLL_INTERVAL_MS,
    };
    use crate::test_utils::assert_abs_diff_eq;

    // Verify domain bounds match config constants
    #[test]
    fn domain_bounds_match_config() {
        assert_abs_diff_eq!(minimum_step_bounds::MIN, MIN_MINIMUM_STEP_SECS);
        assert_abs_diff_eq!(minimum_step_bounds::MAX, MAX_MINIMUM_STEP_SECS);
        assert_abs_diff_eq!(minimum_step_bounds::DEFAULT, DEFAULT_MINIMUM_STEP_SECS);
        assert_eq!(hold_window_bounds::MIN, MIN_HOLD_WINDOW_MS);
        assert_eq!(hold_window_bounds::MAX, MAX_HOLD_WINDOW_MS);
        assert_eq!(hold_window_bounds::DEFAULT, DEFAULT_HOLD_WINDOW_MS);
        assert_eq!(poll_interval_bounds::MIN, MIN_POLL_INTERVAL_MS);
        assert_eq!(poll_interval_bounds::MAX, MAX_POLL_INTERVAL_MS);
        assert_eq!(poll_interval_bounds::DEFAULT, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn minimum_step_clamps_to_valid_range() {
        assert_abs_diff_eq!(MinimumStep::new(0.0).value(), minimum_step_bounds::MIN);
        assert_abs_diff_eq!(MinimumStep::new(-3.0).value(), minimum_step_bounds::MIN);
        assert_abs_diff_eq!(MinimumStep::new(100.0).value(), minimum_step_bounds::MAX);
        assert!(MinimumStep::new(0.0).is_min());
        assert!(MinimumStep::new(100.0).is_max());
    }

    #[test]
    fn minimum_step_rejects_nan() {
        assert_eq!(MinimumStep::new(f64::NAN), MinimumStep::default());
    }

    #[test]
    fn hold_window_converts_to_duration() {
        assert_eq!(
            HoldWindow::new(250).as_duration(),
            Duration::from_millis(250)
        );
        assert_eq!(HoldWindow::new(0).value(), hold_window_bounds::MIN);
    }

    #[test]
    fn poll_interval_clamps_to_valid_range() {
        assert_eq!(PollInterval::new(0).value(), poll_interval_bounds::MIN);
        assert_eq!(PollInterval::new(10_000).value(), poll_interval_bounds::MAX);
        assert_eq!(PollInterval::default().as_duration(), Duration::from_millis(16));
    }

    #[test]
    fn deserializing_clamps_out_of_range_values() {
        #[derive(Deserialize)]
        struct Holder {
            step: MinimumStep,
            hold: HoldWindow,
        }
        let holder: Holder = toml::from_str("step = 50.0\nhold = 1").expect("valid toml");
        assert!(holder.step.is_max());
        assert_eq!(holder.hold.value(), hold_window_bounds::MIN);
    }
}
