// SPDX-License-Identifier: MPL-2.0
//! Paced playback domain types.
//!
//! This module contains segment configuration, the pacing state enum and
//! notification value objects, independent of any media backend.

pub mod newtypes;
pub mod notification;
pub mod segment;
pub mod state;

// Re-export commonly used types
pub use newtypes::{HoldWindow, MinimumStep, PollInterval};
pub use notification::{NotificationKind, SourceNotification, SubscriptionId};
pub use segment::{Pacing, Segment};
pub use state::PacingState;
