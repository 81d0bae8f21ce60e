// SPDX-License-Identifier: MPL-2.0
//! Progress sink port definition.
//!
//! The controller publishes what a view needs to render: the input count as a
//! progress bar, whether the advance affordance is shown, and whether the
//! video surface should be visible at all.

use crate::domain::pacing::PacingState;
use tokio::sync::mpsc::UnboundedSender;

/// Port for the view layer.
///
/// Only `progress` and `awaiting_input` are required; the other hooks are
/// optional refinements.
pub trait ProgressSink {
    /// Publishes the number of accepted inputs, in `[0, required]`.
    fn progress(&mut self, accepted: u32, required: u32);

    /// Shows or hides the advance affordance.
    fn awaiting_input(&mut self, visible: bool);

    /// Shows or hides the video surface. Hidden after a load failure.
    fn video_visible(&mut self, _visible: bool) {}

    /// Reports every state transition.
    fn state_changed(&mut self, _state: PacingState) {}
}

/// Everything a [`ProgressSink`] can be told, as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Accepted input count changed.
    Progress {
        /// Inputs accepted so far.
        accepted: u32,
        /// Inputs needed to clear the checkpoint.
        required: u32,
    },
    /// Advance affordance visibility changed.
    AwaitingInput(bool),
    /// Video surface visibility changed.
    VideoVisible(bool),
    /// The controller entered a new state.
    StateChanged(PacingState),
}

/// Collects events in order. Handy for tests and replay logs.
impl ProgressSink for Vec<ProgressEvent> {
    fn progress(&mut self, accepted: u32, required: u32) {
        self.push(ProgressEvent::Progress { accepted, required });
    }

    fn awaiting_input(&mut self, visible: bool) {
        self.push(ProgressEvent::AwaitingInput(visible));
    }

    fn video_visible(&mut self, visible: bool) {
        self.push(ProgressEvent::VideoVisible(visible));
    }

    fn state_changed(&mut self, state: PacingState) {
        self.push(ProgressEvent::StateChanged(state));
    }
}

/// Forwards events to another task. A closed receiver is ignored.
impl ProgressSink for UnboundedSender<ProgressEvent> {
    fn progress(&mut self, accepted: u32, required: u32) {
        let _ = self.send(ProgressEvent::Progress { accepted, required });
    }

    fn awaiting_input(&mut self, visible: bool) {
        let _ = self.send(ProgressEvent::AwaitingInput(visible));
    }

    fn video_visible(&mut self, visible: bool) {
        let _ = self.send(ProgressEvent::VideoVisible(visible));
    }

    fn state_changed(&mut self, state: PacingState) {
        let _ = self.send(ProgressEvent::StateChanged(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<ProgressEvent> = Vec::new();
        sink.awaiting_input(true);
        sink.progress(1, 25);
        sink.state_changed(PacingState::AwaitingInput);

        assert_eq!(
            sink,
            vec![
                ProgressEvent::AwaitingInput(true),
                ProgressEvent::Progress {
                    accepted: 1,
                    required: 25
                },
                ProgressEvent::StateChanged(PacingState::AwaitingInput),
            ]
        );
    }

    #[test]
    fn channel_sink_survives_closed_receiver() {
        let (mut tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        tx.progress(3, 5);
        tx.video_visible(false);
    }

    #[test]
    fn channel_sink_forwards_events() {
        let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.awaiting_input(false);
        assert_eq!(rx.try_recv(), Ok(ProgressEvent::AwaitingInput(false)));
    }
}
