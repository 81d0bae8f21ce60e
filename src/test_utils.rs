// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and controller plumbing.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

use crate::application::port::{MediaSource, ProgressSink};
use crate::domain::pacing::SourceNotification;
use crate::pacing::{NotificationOutcome, PlaybackController};
use tokio::sync::mpsc::UnboundedReceiver;

/// Delivers every queued notification, as a host event loop would.
pub fn pump<S: MediaSource, P: ProgressSink>(
    controller: &mut PlaybackController<S, P>,
    notifications: &mut UnboundedReceiver<SourceNotification>,
) -> Vec<NotificationOutcome> {
    let mut outcomes = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        outcomes.push(controller.handle_notification(notification));
    }
    outcomes
}
