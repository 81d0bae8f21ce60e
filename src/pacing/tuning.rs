// SPDX-License-Identifier: MPL-2.0
//! Engine-wide timing knobs.

use crate::config::{DEFAULT_DEGENERATE_SPAN_SECS, DEFAULT_END_MARGIN_SECS, DEFAULT_SEEK_EPSILON_SECS};
use crate::domain::pacing::PollInterval;

/// Timing margins shared by every session of a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Interval between position polls.
    pub poll_interval: PollInterval,
    /// Every seek stays at least this far below the media end, in seconds.
    pub seek_epsilon_secs: f64,
    /// A clip ending within this span after the checkpoint is not paced
    /// proportionally; each input advances by the minimum step instead.
    pub degenerate_span_secs: f64,
    /// Distance from the end treated as "reached the end" by position.
    pub end_margin_secs: f64,
    /// Complete the segment from polled position instead of waiting only
    /// for the source's `Ended` notification.
    pub detect_end_by_position: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            poll_interval: PollInterval::default(),
            seek_epsilon_secs: DEFAULT_SEEK_EPSILON_SECS,
            degenerate_span_secs: DEFAULT_DEGENERATE_SPAN_SECS,
            end_margin_secs: DEFAULT_END_MARGIN_SECS,
            detect_end_by_position: false,
        }
    }
}
