// SPDX-License-Identifier: MPL-2.0
//! Async event loop around the controller.
//!
//! The controller itself is synchronous. [`PacingDriver`] feeds it from three
//! sources on one task: a polling interval, advance requests from the view,
//! and notifications posted by the media source. Completed segments are
//! handed to the [`TransitionManager`] until the playlist is exhausted.

use super::controller::{InputOutcome, NotificationOutcome, PlaybackController, TickOutcome};
use super::session::SessionId;
use super::transition::{Transition, TransitionManager};
use crate::application::port::{MediaSource, ProgressSink};
use crate::domain::error::PacingError;
use crate::domain::pacing::SourceNotification;
use crate::error::Result;
use log::{info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant, MissedTickBehavior};

/// One "advance requested" input from the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceRequest;

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Segments that played to their end.
    pub segments_completed: usize,
    /// Advance inputs the controller accepted.
    pub inputs_accepted: u32,
    /// Times playback paused again because inputs stopped.
    pub auto_pauses: u32,
}

/// Runs a playlist to completion.
pub struct PacingDriver<S: MediaSource, P: ProgressSink> {
    controller: PlaybackController<S, P>,
    transitions: TransitionManager,
    notifications: UnboundedReceiver<SourceNotification>,
    inputs: UnboundedReceiver<AdvanceRequest>,
}

impl<S: MediaSource, P: ProgressSink> PacingDriver<S, P> {
    /// Creates a driver over a controller, its playlist and both input channels.
    #[must_use]
    pub fn new(
        controller: PlaybackController<S, P>,
        transitions: TransitionManager,
        notifications: UnboundedReceiver<SourceNotification>,
        inputs: UnboundedReceiver<AdvanceRequest>,
    ) -> Self {
        Self {
            controller,
            transitions,
            notifications,
            inputs,
        }
    }

    /// Plays every segment, returning once the last one completed.
    ///
    /// A closed input channel is not an error: the run continues and simply
    /// stops accepting inputs. A closed notification channel ends the run
    /// with an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment fails to load, the source fails during
    /// playback, or the source closes its notification channel before the
    /// playlist is finished.
    pub async fn run(self) -> Result<RunSummary> {
        let Self {
            mut controller,
            mut transitions,
            mut notifications,
            mut inputs,
        } = self;
        let mut summary = RunSummary::default();

        if transitions.begin(&mut controller)? == Transition::Finished {
            return Ok(summary);
        }

        let mut interval = time::interval(controller.tuning().poll_interval.as_duration());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut inputs_open = true;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match controller.tick(Instant::now().into_std()) {
                        TickOutcome::SegmentCompleted(id) => {
                            if hand_off(id, &mut transitions, &mut controller, &mut summary)? {
                                return Ok(summary);
                            }
                        }
                        TickOutcome::AutoPaused => summary.auto_pauses += 1,
                        TickOutcome::CheckpointReached | TickOutcome::Quiet => {}
                    }
                }
                notification = notifications.recv() => {
                    let Some(notification) = notification else {
                        warn!("Media source closed its notification channel");
                        controller.stop();
                        let locator = current_locator(&transitions);
                        return Err(
                            PacingError::load_failure(locator, "notification channel closed").into(),
                        );
                    };
                    match controller.handle_notification(notification) {
                        NotificationOutcome::SegmentCompleted(id) => {
                            if hand_off(id, &mut transitions, &mut controller, &mut summary)? {
                                return Ok(summary);
                            }
                        }
                        NotificationOutcome::SourceFailed(_) => {
                            let locator = current_locator(&transitions);
                            return Err(PacingError::load_failure(locator, "playback failed").into());
                        }
                        NotificationOutcome::Applied | NotificationOutcome::Ignored => {}
                    }
                }
                request = inputs.recv(), if inputs_open => {
                    match request {
                        Some(AdvanceRequest) => {
                            match controller.advance(Instant::now().into_std()) {
                                InputOutcome::Accepted { .. } | InputOutcome::CountReached => {
                                    summary.inputs_accepted += 1;
                                }
                                InputOutcome::Ignored => {}
                            }
                        }
                        None => inputs_open = false,
                    }
                }
            }
        }
    }
}

fn current_locator(transitions: &TransitionManager) -> String {
    transitions
        .current_segment()
        .map(|segment| segment.locator.clone())
        .unwrap_or_default()
}

/// Returns true once the playlist is finished.
fn hand_off<S: MediaSource, P: ProgressSink>(
    completed: SessionId,
    transitions: &mut TransitionManager,
    controller: &mut PlaybackController<S, P>,
    summary: &mut RunSummary,
) -> Result<bool> {
    match transitions.on_segment_completed(completed, controller)? {
        Transition::Started { index, .. } => {
            summary.segments_completed += 1;
            info!("Advancing to playlist entry {}", index);
            Ok(false)
        }
        Transition::Finished => {
            summary.segments_completed += 1;
            Ok(true)
        }
        Transition::Ignored => Ok(false),
    }
}
