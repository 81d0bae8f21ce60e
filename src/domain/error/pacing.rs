// SPDX-License-Identifier: MPL-2.0
//! Errors raised by paced playback.

use crate::domain::pacing::{NotificationKind, PacingState};
use std::fmt;

/// Reasons a segment is rejected before any session is created.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidSegment {
    /// The locator is empty.
    EmptyLocator,
    /// `required_inputs` must be at least one.
    ZeroRequiredInputs,
    /// The checkpoint lies before the start of the media.
    NegativeCheckpoint(f64),
    /// The checkpoint is NaN or infinite.
    NonFiniteCheckpoint,
}

impl fmt::Display for InvalidSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLocator => write!(f, "segment locator is empty"),
            Self::ZeroRequiredInputs => write!(f, "required input count must be positive"),
            Self::NegativeCheckpoint(secs) => {
                write!(f, "checkpoint time {secs}s is negative")
            }
            Self::NonFiniteCheckpoint => write!(f, "checkpoint time is not a finite number"),
        }
    }
}

/// Specific error types for paced playback.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum PacingError {
    /// The media source could not open the locator. No retry is attempted.
    SourceLoadFailure {
        /// Locator that failed to load.
        locator: String,
        /// Reason reported by the source.
        reason: String,
    },

    /// The segment configuration is unusable.
    InvalidSegmentConfig(InvalidSegment),

    /// A notification arrived in a state where it cannot be acted on.
    ///
    /// Never returned to callers; built for logging only.
    SpuriousNotification {
        /// Notification kind that was discarded.
        kind: NotificationKind,
        /// Controller state at the time.
        state: PacingState,
    },
}

impl PacingError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PacingError::SourceLoadFailure { .. } => "error-pacing-source-load",
            PacingError::InvalidSegmentConfig(_) => "error-pacing-invalid-segment",
            PacingError::SpuriousNotification { .. } => "error-pacing-spurious-notification",
        }
    }

    /// Convenience constructor for load failures.
    #[must_use]
    pub fn load_failure(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        PacingError::SourceLoadFailure {
            locator: locator.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacingError::SourceLoadFailure { locator, reason } => {
                write!(f, "Failed to load '{}': {}", locator, reason)
            }
            PacingError::InvalidSegmentConfig(reason) => {
                write!(f, "Invalid segment: {}", reason)
            }
            PacingError::SpuriousNotification { kind, state } => {
                write!(f, "Ignored '{}' notification while {}", kind, state)
            }
        }
    }
}

impl From<InvalidSegment> for PacingError {
    fn from(reason: InvalidSegment) -> Self {
        PacingError::InvalidSegmentConfig(reason)
    }
}
