// SPDX-License-Identifier: MPL-2.0
//! Media source port definition.
//!
//! This module defines the [`MediaSource`] trait the pacing controller drives.
//! Adapters wrap a concrete player (a native video widget, a browser element,
//! the in-memory simulator) behind it.
//!
//! # Design Notes
//!
//! - The source is **stateful**: it owns the current position and play state
//! - `load` only starts preparation; readiness arrives as a `Ready` notification
//! - Notifications are delivered per subscription through the host's event
//!   loop as [`SourceNotification`](crate::domain::pacing::SourceNotification)
//!   values; the source never calls back into the controller
//! - Sources may fire notifications zero, one or several times and out of
//!   order; the controller defends against all of it

use crate::domain::error::PacingError;
use crate::domain::pacing::{NotificationKind, SubscriptionId};

/// Port for a playable media handle.
///
/// # Lifecycle
///
/// 1. `subscribe()` for the notifications of interest
/// 2. `load()` a locator
/// 3. Wait for `Ready`, then `play()` / `pause()` / `seek()` freely
/// 4. `Ended` reports the end of the media
/// 5. `unsubscribe()` every subscription before the next session subscribes
pub trait MediaSource {
    /// Starts preparing the media behind `locator`.
    ///
    /// Any previously loaded media is stopped first.
    ///
    /// # Errors
    ///
    /// Returns [`PacingError::SourceLoadFailure`] if the locator cannot be
    /// opened at all.
    fn load(&mut self, locator: &str) -> Result<(), PacingError>;

    /// Starts or resumes continuous playback.
    fn play(&mut self);

    /// Pauses playback at the current position.
    fn pause(&mut self);

    /// Moves the playback position to `position_secs`.
    fn seek(&mut self, position_secs: f64);

    /// Returns the current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Returns the media duration in seconds, if known.
    fn duration(&self) -> Option<f64>;

    /// Registers interest in one notification kind.
    fn subscribe(&mut self, kind: NotificationKind) -> SubscriptionId;

    /// Releases a subscription. Unknown identifiers are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}
