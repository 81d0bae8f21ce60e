// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Pacing**: Per-input step floor and hold window
//! - **Polling**: Checkpoint detection tick
//! - **Margins**: Seek and end-of-media safety margins

use crate::domain::pacing::newtypes::{hold_window_bounds, minimum_step_bounds, poll_interval_bounds};

// ==========================================================================
// Pacing Defaults
// ==========================================================================

/// Default minimum time advanced per input (in seconds).
pub const DEFAULT_MINIMUM_STEP_SECS: f64 = minimum_step_bounds::DEFAULT;

/// Smallest accepted per-input step floor (in seconds).
pub const MIN_MINIMUM_STEP_SECS: f64 = minimum_step_bounds::MIN;

/// Largest accepted per-input step floor (in seconds).
pub const MAX_MINIMUM_STEP_SECS: f64 = minimum_step_bounds::MAX;

/// Default time playback keeps running after an input (in milliseconds).
pub const DEFAULT_HOLD_WINDOW_MS: u64 = hold_window_bounds::DEFAULT;

/// Minimum hold window (in milliseconds).
pub const MIN_HOLD_WINDOW_MS: u64 = hold_window_bounds::MIN;

/// Maximum hold window (in milliseconds).
pub const MAX_HOLD_WINDOW_MS: u64 = hold_window_bounds::MAX;

/// Default number of inputs required to clear a checkpoint.
pub const DEFAULT_REQUIRED_INPUTS: u32 = 25;

/// Default checkpoint time (in seconds).
pub const DEFAULT_CHECKPOINT_SECS: f64 = 3.0;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Default polling interval for checkpoint detection (in milliseconds).
///
/// Bounds the worst-case checkpoint detection latency.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = poll_interval_bounds::DEFAULT;

/// Minimum polling interval (in milliseconds).
pub const MIN_POLL_INTERVAL_MS: u64 = poll_interval_bounds::MIN;

/// Maximum polling interval (in milliseconds).
pub const MAX_POLL_INTERVAL_MS: u64 = poll_interval_bounds::MAX;

// ==========================================================================
// Margin Defaults
// ==========================================================================

/// Distance kept between any seek target and the media end (in seconds).
pub const DEFAULT_SEEK_EPSILON_SECS: f64 = 0.05;

/// Remaining span below which a clip is treated as too short to pace (in seconds).
pub const DEFAULT_DEGENERATE_SPAN_SECS: f64 = 0.2;

/// Distance from the end at which position-based end detection fires (in seconds).
pub const DEFAULT_END_MARGIN_SECS: f64 = 0.05;
