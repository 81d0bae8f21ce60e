// SPDX-License-Identifier: MPL-2.0
//! Segment configuration.
//!
//! A [`Segment`] is one playable unit. When it carries [`Pacing`], playback
//! stops at the checkpoint until enough advance inputs arrive; without it,
//! the segment simply plays through.

use super::newtypes::{HoldWindow, MinimumStep};
use crate::domain::error::InvalidSegment;
use serde::{Deserialize, Serialize};

/// Checkpoint pacing rules for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pacing {
    /// Time at which continuous playback stops, in seconds.
    ///
    /// May exceed the real media duration; playback then stops at the end.
    pub checkpoint_secs: f64,
    /// Number of inputs needed to clear the checkpoint.
    pub required_inputs: u32,
    /// Floor for the time advanced by one input.
    #[serde(default)]
    pub minimum_step: MinimumStep,
    /// Time playback keeps running after each input.
    #[serde(default)]
    pub hold_window: HoldWindow,
}

impl Pacing {
    /// Creates pacing rules with default step floor and hold window.
    #[must_use]
    pub fn new(checkpoint_secs: f64, required_inputs: u32) -> Self {
        Self {
            checkpoint_secs,
            required_inputs,
            minimum_step: MinimumStep::default(),
            hold_window: HoldWindow::default(),
        }
    }

    /// Sets the per-input step floor.
    #[must_use]
    pub fn with_minimum_step(mut self, minimum_step: MinimumStep) -> Self {
        self.minimum_step = minimum_step;
        self
    }

    /// Sets the hold window.
    #[must_use]
    pub fn with_hold_window(mut self, hold_window: HoldWindow) -> Self {
        self.hold_window = hold_window;
        self
    }

    /// Checks the rules that cannot be expressed by the field types.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidSegment`] for a zero input count or a negative
    /// or non-finite checkpoint.
    pub fn validate(&self) -> Result<(), InvalidSegment> {
        if !self.checkpoint_secs.is_finite() {
            return Err(InvalidSegment::NonFiniteCheckpoint);
        }
        if self.checkpoint_secs < 0.0 {
            return Err(InvalidSegment::NegativeCheckpoint(self.checkpoint_secs));
        }
        if self.required_inputs == 0 {
            return Err(InvalidSegment::ZeroRequiredInputs);
        }
        Ok(())
    }
}

/// One configured unit of playback followed by a handoff to the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Opaque reference resolved by the media source.
    pub locator: String,
    /// Checkpoint rules, or `None` to play straight through.
    #[serde(default)]
    pub pacing: Option<Pacing>,
}

impl Segment {
    /// Creates a segment that pauses at a checkpoint.
    #[must_use]
    pub fn paced(locator: impl Into<String>, pacing: Pacing) -> Self {
        Self {
            locator: locator.into(),
            pacing: Some(pacing),
        }
    }

    /// Creates a segment that plays straight to its end.
    #[must_use]
    pub fn passthrough(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            pacing: None,
        }
    }

    /// Returns true if the segment stops at a checkpoint.
    #[must_use]
    pub fn is_paced(&self) -> bool {
        self.pacing.is_some()
    }

    /// Validates the segment before a session is created for it.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidSegment`] describing the first problem found.
    pub fn validate(&self) -> Result<(), InvalidSegment> {
        if self.locator.trim().is_empty() {
            return Err(InvalidSegment::EmptyLocator);
        }
        match &self.pacing {
            Some(pacing) => pacing.validate(),
            None => Ok(()),
        }
    }
}
