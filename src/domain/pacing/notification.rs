// SPDX-License-Identifier: MPL-2.0
//! Media source notification types.

use std::fmt;

/// Identifier handed out by a media source for one registered subscription.
///
/// Notifications carry the identifier they were delivered for, which lets
/// the controller discard anything addressed to a released subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Asynchronous events a media source can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Duration and seeking are now valid.
    Ready,
    /// Playback reached the end of the media.
    Ended,
    /// The source hit an unrecoverable error after loading.
    Failed,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::Ended => f.write_str("ended"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// A notification delivered for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceNotification {
    /// Subscription the notification was delivered to.
    pub subscription: SubscriptionId,
    /// What happened.
    pub kind: NotificationKind,
}

impl SourceNotification {
    /// Creates a notification for the given subscription.
    #[must_use]
    pub fn new(subscription: SubscriptionId, kind: NotificationKind) -> Self {
        Self { subscription, kind }
    }
}
