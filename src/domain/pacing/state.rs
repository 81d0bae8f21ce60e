// SPDX-License-Identifier: MPL-2.0
//! Paced playback state machine.
//!
//! This module defines the states a paced segment moves through.

use std::fmt;

/// Represents the current state of a paced playback session.
///
/// Transitions only move forward within a session:
/// `Idle → Loading → PlayingToCheckpoint → AwaitingInput → ResumingToEnd → Completed`.
/// A source failure returns the controller to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacingState {
    /// No session is active.
    #[default]
    Idle,
    /// The source is preparing the segment; duration is not known yet.
    Loading,
    /// Continuous playback until the checkpoint is crossed.
    PlayingToCheckpoint,
    /// Playback is held at the checkpoint and advanced by discrete inputs.
    AwaitingInput,
    /// The required inputs were received; playback runs to the end unpaced.
    ResumingToEnd,
    /// The source reported the end of the segment.
    Completed,
}

impl PacingState {
    /// Returns true if no session is active.
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if the session is waiting for advance inputs.
    #[must_use]
    pub fn is_awaiting_input(self) -> bool {
        matches!(self, Self::AwaitingInput)
    }

    /// Returns true if the segment finished playing.
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true while a session holds the media source.
    ///
    /// A completed session still holds it until the next segment starts.
    #[must_use]
    pub fn holds_source(self) -> bool {
        !self.is_idle()
    }

    /// Returns true while the source is expected to be producing frames.
    #[must_use]
    pub fn is_playing_continuously(self) -> bool {
        matches!(self, Self::PlayingToCheckpoint | Self::ResumingToEnd)
    }
}

impl fmt::Display for PacingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::PlayingToCheckpoint => "playing-to-checkpoint",
            Self::AwaitingInput => "awaiting-input",
            Self::ResumingToEnd => "resuming-to-end",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}
