// SPDX-License-Identifier: MPL-2.0
//! Checkpoint-paced playback state machine.
//!
//! Manages one segment at a time with clear state transitions:
//! - Idle: No session, the source is unused
//! - Loading: Waiting for the source to report readiness
//! - PlayingToCheckpoint: Continuous playback, position polled each tick
//! - AwaitingInput: Held at the checkpoint, advanced by discrete inputs
//! - ResumingToEnd: Required inputs received, playing out unpaced
//! - Completed: Source reported the end, waiting for the next segment
//!
//! Every entry point runs to completion and returns. Waiting is expressed as
//! "a notification or tick will arrive later", never as a blocking call.

use super::scheduler::{clamp_target, compute_step};
use super::session::{PlaybackSession, SessionId, SessionSubscriptions};
use super::tuning::Tuning;
use crate::application::port::{MediaSource, ProgressSink};
use crate::domain::error::PacingError;
use crate::domain::pacing::{NotificationKind, PacingState, Segment, SourceNotification};
use log::{debug, info, warn};
use std::time::Instant;

/// Result of an advance input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The input moved playback forward; more are needed.
    Accepted {
        /// Inputs accepted so far.
        accepted: u32,
        /// Inputs needed to clear the checkpoint.
        required: u32,
    },
    /// The input completed the required count; playback resumes to the end.
    CountReached,
    /// The input arrived outside `AwaitingInput` or after the count was reached.
    Ignored,
}

/// Result of handing a notification to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The notification drove a transition.
    Applied,
    /// Stale, duplicate or out-of-order; nothing changed.
    Ignored,
    /// The session's segment finished playing.
    SegmentCompleted(SessionId),
    /// The source failed; the session was closed and the controller is idle.
    SourceFailed(SessionId),
}

/// Result of one polling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do this tick.
    Quiet,
    /// Playback paused at the checkpoint.
    CheckpointReached,
    /// The hold window elapsed without input; playback paused again.
    AutoPaused,
    /// The end was detected by position.
    SegmentCompleted(SessionId),
}

/// Drives a [`MediaSource`] through checkpoint-paced playback.
///
/// The source and the progress sink are injected; the controller never looks
/// anything up from global state. Subscriptions on the source live exactly as
/// long as the session that registered them, including when the controller
/// itself is dropped.
pub struct PlaybackController<S: MediaSource, P: ProgressSink> {
    /// Media handle, used by the active session only.
    source: S,

    /// View-facing progress output.
    sink: P,

    /// Timing margins.
    tuning: Tuning,

    /// Active session, if any. `None` means `Idle`.
    session: Option<PlaybackSession>,

    /// Raw value of the next session ID.
    next_session_id: u64,
}

impl<S: MediaSource, P: ProgressSink> PlaybackController<S, P> {
    /// Creates an idle controller.
    pub fn new(source: S, sink: P, tuning: Tuning) -> Self {
        Self {
            source,
            sink,
            tuning,
            session: None,
            next_session_id: 1,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> PacingState {
        self.session
            .as_ref()
            .map_or(PacingState::Idle, PlaybackSession::state)
    }

    /// Returns the active session, if any.
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Returns the media source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the progress sink.
    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Returns the progress sink mutably (e.g. to drain recorded events).
    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    /// Returns the timing margins.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Starts a new segment.
    ///
    /// State transitions:
    /// - Any state → Loading (a previous session is closed first)
    /// - Loading → Idle if the source refuses the locator
    ///
    /// An invalid segment is rejected before anything else happens, leaving
    /// the current session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PacingError::InvalidSegmentConfig`] or
    /// [`PacingError::SourceLoadFailure`].
    pub fn start_segment(&mut self, segment: Segment) -> Result<SessionId, PacingError> {
        segment.validate()?;

        // Old subscriptions and any pending auto-re-pause go away before the
        // new session registers anything.
        self.close_session();

        let id = SessionId::new(self.next_session_id);
        self.next_session_id += 1;

        // Subscribe before loading so a ready signal fired from inside
        // `load` is not missed.
        let subscriptions = SessionSubscriptions::register(&mut self.source);
        let session = PlaybackSession::new(id, segment, subscriptions);
        let locator = session.segment().locator.clone();
        let required = session.required_inputs();
        self.session = Some(session);

        self.sink.awaiting_input(false);
        self.sink.progress(0, required);
        self.sink.state_changed(PacingState::Loading);

        if let Err(err) = self.source.load(&locator) {
            warn!("Segment {} failed to load: {}", id.value(), err);
            self.close_session();
            self.sink.video_visible(false);
            return Err(err);
        }

        info!("Segment {} loading '{}'", id.value(), locator);
        Ok(id)
    }

    /// Stops the active session, if any, and returns to `Idle`.
    pub fn stop(&mut self) {
        if !self.state().holds_source() {
            return;
        }
        self.source.pause();
        self.close_session();
        self.sink.awaiting_input(false);
        self.sink.video_visible(false);
    }

    /// Handles a notification delivered by the source.
    ///
    /// Notifications addressed to a released subscription, duplicates and
    /// out-of-order deliveries are logged and dropped.
    pub fn handle_notification(&mut self, notification: SourceNotification) -> NotificationOutcome {
        let Some(session) = self.session.as_ref() else {
            log_spurious(notification.kind, PacingState::Idle);
            return NotificationOutcome::Ignored;
        };
        if !session.subscriptions().owns(&notification) {
            debug!(
                "Dropping {} notification for released subscription {}",
                notification.kind,
                notification.subscription.value()
            );
            return NotificationOutcome::Ignored;
        }

        let id = session.id();
        match (notification.kind, session.state()) {
            (NotificationKind::Ready, PacingState::Loading) => {
                self.on_ready();
                NotificationOutcome::Applied
            }
            (NotificationKind::Ended, PacingState::ResumingToEnd) => {
                self.complete();
                NotificationOutcome::SegmentCompleted(id)
            }
            // The media ran out before a poll saw the checkpoint; the
            // available duration is as far as the checkpoint can get.
            (NotificationKind::Ended, PacingState::PlayingToCheckpoint) => {
                if self.enter_checkpoint(true) {
                    NotificationOutcome::Applied
                } else {
                    NotificationOutcome::Ignored
                }
            }
            (NotificationKind::Failed, state) if !state.is_completed() => {
                self.fail();
                NotificationOutcome::SourceFailed(id)
            }
            (kind, state) => {
                log_spurious(kind, state);
                NotificationOutcome::Ignored
            }
        }
    }

    /// Polls the source once.
    ///
    /// Detects the checkpoint crossing, applies the auto-re-pause once the
    /// hold window elapsed, and optionally detects the end by position.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Quiet;
        };

        let state = session.state();
        if session.measured_duration().is_none()
            && state != PacingState::Loading
            && session.learn_duration(self.source.duration())
        {
            debug!(
                "Segment {} reported its duration late: {:?}s",
                session.id().value(),
                session.measured_duration()
            );
        }

        match state {
            PacingState::PlayingToCheckpoint => {
                let Some(checkpoint) = session.segment().pacing.as_ref().map(|p| p.checkpoint_secs)
                else {
                    return TickOutcome::Quiet;
                };
                let threshold = clamp_target(
                    checkpoint,
                    session.measured_duration(),
                    self.tuning.seek_epsilon_secs,
                );
                if self.source.current_time() >= threshold && self.enter_checkpoint(false) {
                    TickOutcome::CheckpointReached
                } else {
                    TickOutcome::Quiet
                }
            }
            PacingState::AwaitingInput => {
                let Some(hold) = session.segment().pacing.as_ref().map(|p| p.hold_window) else {
                    return TickOutcome::Quiet;
                };
                // Re-validated on every tick: a completed count has already
                // left this state, so a stale window can never pause it.
                if session.inputs_complete()
                    || !session.debouncer().should_auto_pause(now, hold.as_duration())
                {
                    return TickOutcome::Quiet;
                }
                session.debouncer_mut().settle();
                self.source.pause();
                debug!(
                    "Segment {} re-paused after {} inputs",
                    session.id().value(),
                    session.inputs_accepted()
                );
                TickOutcome::AutoPaused
            }
            PacingState::ResumingToEnd if self.tuning.detect_end_by_position => {
                let Some(duration) = session.measured_duration() else {
                    return TickOutcome::Quiet;
                };
                if self.source.current_time() < duration - self.tuning.end_margin_secs {
                    return TickOutcome::Quiet;
                }
                let id = session.id();
                self.complete();
                TickOutcome::SegmentCompleted(id)
            }
            _ => TickOutcome::Quiet,
        }
    }

    /// Handles one "advance requested" input.
    ///
    /// State transitions:
    /// - AwaitingInput → AwaitingInput (count below required)
    /// - AwaitingInput → ResumingToEnd (count reached)
    /// - Any other state → no change, input ignored
    pub fn advance(&mut self, now: Instant) -> InputOutcome {
        let Some(session) = self.session.as_mut() else {
            debug!("Ignoring advance input: no active segment");
            return InputOutcome::Ignored;
        };
        if !session.state().is_awaiting_input() || session.inputs_complete() {
            debug!("Ignoring advance input while {}", session.state());
            return InputOutcome::Ignored;
        }
        let Some((checkpoint, required, minimum_step)) = session
            .segment()
            .pacing
            .as_ref()
            .map(|p| (p.checkpoint_secs, p.required_inputs, p.minimum_step.value()))
        else {
            return InputOutcome::Ignored;
        };

        let accepted = session.accept_input();
        let step = session.step_per_input().unwrap_or(minimum_step);
        let target = clamp_target(
            checkpoint + f64::from(accepted) * step,
            session.measured_duration(),
            self.tuning.seek_epsilon_secs,
        );
        session.debouncer_mut().record_input(now);

        self.sink.progress(accepted, required);
        self.source.seek(target);
        self.source.play();

        if accepted < required {
            return InputOutcome::Accepted { accepted, required };
        }

        // Full count wins over any auto-re-pause still pending.
        session.debouncer_mut().reset();
        session.set_state(PacingState::ResumingToEnd);
        self.sink.awaiting_input(false);
        self.sink.state_changed(PacingState::ResumingToEnd);
        info!(
            "Segment {} cleared its checkpoint after {} inputs",
            session.id().value(),
            accepted
        );
        InputOutcome::CountReached
    }

    /// Loading → PlayingToCheckpoint, or → ResumingToEnd for unpaced segments.
    fn on_ready(&mut self) {
        let duration = self.source.duration();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.learn_duration(duration);

        let next = match session.segment().pacing.as_ref() {
            Some(pacing) => {
                let step = compute_step(
                    session.measured_duration(),
                    pacing.checkpoint_secs,
                    pacing.required_inputs,
                    pacing.minimum_step.value(),
                    self.tuning.degenerate_span_secs,
                );
                session.fix_step(step);
                debug!(
                    "Segment {} ready: duration {:?}s, {:.3}s per input",
                    session.id().value(),
                    session.measured_duration(),
                    step
                );
                PacingState::PlayingToCheckpoint
            }
            None => PacingState::ResumingToEnd,
        };
        session.set_state(next);

        self.source.play();
        self.sink.video_visible(true);
        self.sink.state_changed(next);
    }

    /// PlayingToCheckpoint → AwaitingInput. Returns false if already crossed.
    ///
    /// `at_end` is set when the source reported the end of the media, so the
    /// current position bounds the snap if no duration is known.
    fn enter_checkpoint(&mut self, at_end: bool) -> bool {
        let reported = self.source.duration();
        let position = self.source.current_time();
        let epsilon = self.tuning.seek_epsilon_secs;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(checkpoint) = session.segment().pacing.as_ref().map(|p| p.checkpoint_secs) else {
            return false;
        };
        if !session.cross_checkpoint() {
            return false;
        }
        session.learn_duration(reported);

        // Snap to the exact checkpoint; polling granularity overshoots it.
        let mut snap = clamp_target(checkpoint, session.measured_duration(), epsilon);
        if at_end && session.measured_duration().is_none() {
            snap = snap.min((position - epsilon).max(0.0));
        }
        session.set_state(PacingState::AwaitingInput);
        let accepted = session.inputs_accepted();
        let required = session.required_inputs();
        info!(
            "Segment {} paused at checkpoint {:.3}s",
            session.id().value(),
            snap
        );

        self.source.pause();
        self.source.seek(snap);
        self.sink.state_changed(PacingState::AwaitingInput);
        self.sink.awaiting_input(true);
        self.sink.progress(accepted, required);
        true
    }

    /// ResumingToEnd → Completed.
    fn complete(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.set_state(PacingState::Completed);
            info!("Segment {} completed", session.id().value());
        }
        self.sink.awaiting_input(false);
        self.sink.state_changed(PacingState::Completed);
    }

    /// Any active state → Idle after a source failure.
    fn fail(&mut self) {
        if let Some(session) = self.session.as_ref() {
            warn!(
                "Source failed during segment {} ('{}')",
                session.id().value(),
                session.segment().locator
            );
        }
        self.source.pause();
        self.close_session();
        self.sink.awaiting_input(false);
        self.sink.video_visible(false);
    }

    /// Releases the session's subscriptions and returns to Idle.
    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("Closing segment {}", session.id().value());
            session.close(&mut self.source);
            self.sink.state_changed(PacingState::Idle);
        }
    }
}

impl<S: MediaSource, P: ProgressSink> Drop for PlaybackController<S, P> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.close(&mut self.source);
        }
    }
}

fn log_spurious(kind: NotificationKind, state: PacingState) {
    debug!("{}", PacingError::SpuriousNotification { kind, state });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::ProgressEvent;
    use crate::domain::pacing::{HoldWindow, MinimumStep, Pacing};
    use crate::infrastructure::simulated::{MediaScript, SimulatedMediaSource, SourceCall};
    use crate::test_utils::{assert_abs_diff_eq, pump};
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    type Controller = PlaybackController<SimulatedMediaSource, Vec<ProgressEvent>>;

    const FRAME: Duration = Duration::from_millis(20);

    fn setup(duration: Option<f64>) -> (Controller, SimulatedMediaSource, UnboundedReceiver<SourceNotification>) {
        let (source, rx) = SimulatedMediaSource::new();
        source.add_media("clip.mp4", MediaScript::with_duration(duration));
        let controller = PlaybackController::new(source.clone(), Vec::new(), Tuning::default());
        (controller, source, rx)
    }

    fn paced(checkpoint: f64, required: u32) -> Segment {
        Segment::paced(
            "clip.mp4",
            Pacing::new(checkpoint, required)
                .with_minimum_step(MinimumStep::new(0.08))
                .with_hold_window(HoldWindow::new(120)),
        )
    }

    /// Plays the source until the checkpoint pause, polling every frame.
    fn run_to_checkpoint(
        controller: &mut Controller,
        source: &SimulatedMediaSource,
        rx: &mut UnboundedReceiver<SourceNotification>,
        now: Instant,
    ) {
        for _ in 0..10_000 {
            source.advance(FRAME);
            pump(controller, rx);
            controller.tick(now);
            if controller.state() == PacingState::AwaitingInput {
                return;
            }
        }
        panic!("checkpoint never reached");
    }

    #[test]
    fn start_segment_registers_subscriptions_and_loads() {
        let (mut controller, source, _rx) = setup(Some(30.0));

        controller.start_segment(paced(3.0, 25)).unwrap();

        assert_eq!(controller.state(), PacingState::Loading);
        assert_eq!(source.live_subscriptions(), 3);
        assert_eq!(source.loaded_locator().as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn ready_computes_step_and_starts_playback() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        controller.start_segment(paced(3.0, 25)).unwrap();

        source.advance(FRAME);
        pump(&mut controller, &mut rx);

        assert_eq!(controller.state(), PacingState::PlayingToCheckpoint);
        assert!(source.is_playing());
        let step = controller.session().unwrap().step_per_input().unwrap();
        assert_abs_diff_eq!(step, 1.08, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_ready_is_ignored() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        controller.start_segment(paced(3.0, 25)).unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);

        source.emit(NotificationKind::Ready);
        let outcomes = pump(&mut controller, &mut rx);

        assert_eq!(outcomes, vec![NotificationOutcome::Ignored]);
        assert_eq!(controller.state(), PacingState::PlayingToCheckpoint);
    }

    #[test]
    fn checkpoint_pause_snaps_to_checkpoint() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        let now = Instant::now();
        controller.start_segment(paced(3.0, 25)).unwrap();

        run_to_checkpoint(&mut controller, &source, &mut rx, now);

        assert!(!source.is_playing());
        assert_abs_diff_eq!(source.position(), 3.0, epsilon = 1e-9);
        assert!(controller.sink().contains(&ProgressEvent::AwaitingInput(true)));
    }

    #[test]
    fn input_before_checkpoint_is_ignored() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        controller.start_segment(paced(3.0, 25)).unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);

        assert_eq!(controller.advance(Instant::now()), InputOutcome::Ignored);
        assert_eq!(controller.session().unwrap().inputs_accepted(), 0);
    }

    #[test]
    fn input_seeks_by_step_and_plays() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        let now = Instant::now();
        controller.start_segment(paced(3.0, 25)).unwrap();
        run_to_checkpoint(&mut controller, &source, &mut rx, now);

        let outcome = controller.advance(now);

        assert_eq!(
            outcome,
            InputOutcome::Accepted {
                accepted: 1,
                required: 25
            }
        );
        assert_abs_diff_eq!(source.position(), 4.08, epsilon = 1e-9);
        assert!(source.is_playing());
    }

    #[test]
    fn load_failure_returns_to_idle_and_releases_subscriptions() {
        let (mut controller, source, _rx) = setup(Some(30.0));

        let result = controller.start_segment(Segment::passthrough("missing.mp4"));

        assert!(matches!(result, Err(PacingError::SourceLoadFailure { .. })));
        assert_eq!(controller.state(), PacingState::Idle);
        assert_eq!(source.live_subscriptions(), 0);
        assert!(controller.sink().contains(&ProgressEvent::VideoVisible(false)));
        assert!(!controller.sink().contains(&ProgressEvent::VideoVisible(true)));
    }

    #[test]
    fn invalid_segment_keeps_current_session() {
        let (mut controller, _source, _rx) = setup(Some(30.0));
        let id = controller.start_segment(paced(3.0, 25)).unwrap();

        let result = controller.start_segment(paced(3.0, 0));

        assert!(matches!(result, Err(PacingError::InvalidSegmentConfig(_))));
        assert_eq!(controller.session().unwrap().id(), id);
    }

    #[test]
    fn source_failure_closes_session() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        let id = controller.start_segment(paced(3.0, 25)).unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);

        source.emit(NotificationKind::Failed);
        let outcomes = pump(&mut controller, &mut rx);

        assert_eq!(outcomes, vec![NotificationOutcome::SourceFailed(id)]);
        assert_eq!(controller.state(), PacingState::Idle);
        assert_eq!(source.live_subscriptions(), 0);
    }

    #[test]
    fn passthrough_plays_to_end_without_affordance() {
        let (source, mut rx) = SimulatedMediaSource::new();
        source.add_media("intro.mp4", MediaScript::with_duration(Some(1.0)));
        let mut controller = PlaybackController::new(source.clone(), Vec::new(), Tuning::default());
        let id = controller.start_segment(Segment::passthrough("intro.mp4")).unwrap();

        let mut completed = None;
        for _ in 0..100 {
            source.advance(FRAME);
            for outcome in pump(&mut controller, &mut rx) {
                if let NotificationOutcome::SegmentCompleted(done) = outcome {
                    completed = Some(done);
                }
            }
        }

        assert_eq!(completed, Some(id));
        assert!(!controller.sink().contains(&ProgressEvent::AwaitingInput(true)));
    }

    #[test]
    fn end_detected_by_position_when_enabled() {
        let (source, mut rx) = SimulatedMediaSource::new();
        source.add_media("intro.mp4", MediaScript::with_duration(Some(1.0)));
        let tuning = Tuning {
            detect_end_by_position: true,
            ..Tuning::default()
        };
        let mut controller = PlaybackController::new(source.clone(), Vec::new(), tuning);
        let id = controller.start_segment(Segment::passthrough("intro.mp4")).unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);

        // Stop short of the real end; the margin covers the rest.
        source.advance(Duration::from_millis(960));
        assert_eq!(controller.tick(Instant::now()), TickOutcome::SegmentCompleted(id));
        assert_eq!(controller.state(), PacingState::Completed);
    }

    #[test]
    fn late_duration_is_used_for_clamping_only() {
        let (source, mut rx) = SimulatedMediaSource::new();
        source.add_media("live.mp4", MediaScript::with_duration(Some(6.0)).revealed_late());
        let mut controller = PlaybackController::new(source.clone(), Vec::new(), Tuning::default());
        let now = Instant::now();
        controller
            .start_segment(Segment::paced("live.mp4", Pacing::new(1.0, 2)))
            .unwrap();

        for _ in 0..1000 {
            source.advance(FRAME);
            pump(&mut controller, &mut rx);
            controller.tick(now);
            if controller.state() == PacingState::AwaitingInput {
                break;
            }
        }

        let session = controller.session().unwrap();
        assert_eq!(session.step_per_input(), Some(MinimumStep::default().value()));
        assert_eq!(session.measured_duration(), Some(6.0));
    }

    #[test]
    fn late_duration_bounds_snap_when_media_ends_before_a_poll() {
        let (source, mut rx) = SimulatedMediaSource::new();
        source.add_media("short.mp4", MediaScript::with_duration(Some(0.5)).revealed_late());
        let mut controller = PlaybackController::new(source.clone(), Vec::new(), Tuning::default());
        controller
            .start_segment(Segment::paced("short.mp4", Pacing::new(3.0, 5)))
            .unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);
        assert_eq!(controller.session().unwrap().measured_duration(), None);

        // The whole clip plays out between two polls.
        source.advance(Duration::from_secs(1));
        pump(&mut controller, &mut rx);

        assert_eq!(controller.state(), PacingState::AwaitingInput);
        assert_eq!(controller.session().unwrap().measured_duration(), Some(0.5));
        let seeks = source.seeks();
        assert_eq!(seeks.len(), 1);
        assert_abs_diff_eq!(seeks[0], 0.45, epsilon = 1e-9);
    }

    #[test]
    fn end_without_duration_snaps_below_position() {
        let (mut controller, source, mut rx) = setup(None);
        let now = Instant::now();
        controller.start_segment(paced(3.0, 5)).unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);
        for _ in 0..50 {
            source.advance(FRAME);
            controller.tick(now);
        }
        let position = source.position();
        assert!(position < 3.0);

        source.emit(NotificationKind::Ended);
        let outcomes = pump(&mut controller, &mut rx);

        assert_eq!(outcomes, vec![NotificationOutcome::Applied]);
        assert_eq!(controller.state(), PacingState::AwaitingInput);
        let seeks = source.seeks();
        assert_eq!(seeks.len(), 1);
        let margin = Tuning::default().seek_epsilon_secs;
        assert_abs_diff_eq!(seeks[0], position - margin, epsilon = 1e-9);
    }

    #[test]
    fn dropping_controller_releases_subscriptions() {
        let (source, _rx) = SimulatedMediaSource::new();
        source.add_media("clip.mp4", MediaScript::with_duration(Some(5.0)));
        {
            let mut controller =
                PlaybackController::new(source.clone(), Vec::new(), Tuning::default());
            controller.start_segment(paced(1.0, 2)).unwrap();
            assert_eq!(source.live_subscriptions(), 3);
        }
        assert_eq!(source.live_subscriptions(), 0);
    }

    #[test]
    fn stop_pauses_and_returns_to_idle() {
        let (mut controller, source, mut rx) = setup(Some(30.0));
        controller.start_segment(paced(3.0, 25)).unwrap();
        source.advance(FRAME);
        pump(&mut controller, &mut rx);

        controller.stop();

        assert_eq!(controller.state(), PacingState::Idle);
        assert!(!source.is_playing());
        assert!(matches!(
            source.calls().last(),
            Some(SourceCall::Unsubscribe(_))
        ));
        assert_eq!(source.live_subscriptions(), 0);
        assert_eq!(
            controller.sink().last(),
            Some(&ProgressEvent::VideoVisible(false))
        );
    }
}
