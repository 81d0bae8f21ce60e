// SPDX-License-Identifier: MPL-2.0
//! Per-segment playback session.
//!
//! A session is created when a segment starts and discarded when the next one
//! starts or the controller stops. It owns the counters of one run and the
//! subscriptions registered on the media source for that run.

use super::debouncer::InputDebouncer;
use crate::application::port::MediaSource;
use crate::domain::pacing::{NotificationKind, PacingState, Segment, SourceNotification, SubscriptionId};

/// Identifies one session. Each started segment gets a fresh ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
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

/// The notification subscriptions held by one session.
///
/// Registered exactly once when the session is created and released
/// exactly once, on whichever path ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSubscriptions {
    ready: SubscriptionId,
    ended: SubscriptionId,
    failed: SubscriptionId,
}

impl SessionSubscriptions {
    /// Subscribes to every notification a session reacts to.
    pub fn register<S: MediaSource + ?Sized>(source: &mut S) -> Self {
        Self {
            ready: source.subscribe(NotificationKind::Ready),
            ended: source.subscribe(NotificationKind::Ended),
            failed: source.subscribe(NotificationKind::Failed),
        }
    }

    /// Returns true if the notification was delivered to one of these
    /// subscriptions, under the kind it was registered for.
    #[must_use]
    pub fn owns(&self, notification: &SourceNotification) -> bool {
        let expected = match notification.kind {
            NotificationKind::Ready => self.ready,
            NotificationKind::Ended => self.ended,
            NotificationKind::Failed => self.failed,
        };
        expected == notification.subscription
    }

    /// Releases every subscription.
    pub fn release<S: MediaSource + ?Sized>(self, source: &mut S) {
        source.unsubscribe(self.ready);
        source.unsubscribe(self.ended);
        source.unsubscribe(self.failed);
    }
}

/// Mutable state of one segment run.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    id: SessionId,
    segment: Segment,
    state: PacingState,
    measured_duration: Option<f64>,
    step_per_input: Option<f64>,
    inputs_accepted: u32,
    checkpoint_crossed: bool,
    debouncer: InputDebouncer,
    subscriptions: SessionSubscriptions,
}

impl PlaybackSession {
    /// Creates a session in the `Loading` state with fresh counters.
    #[must_use]
    pub fn new(id: SessionId, segment: Segment, subscriptions: SessionSubscriptions) -> Self {
        Self {
            id,
            segment,
            state: PacingState::Loading,
            measured_duration: None,
            step_per_input: None,
            inputs_accepted: 0,
            checkpoint_crossed: false,
            debouncer: InputDebouncer::new(),
            subscriptions,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the segment being played.
    #[must_use]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> PacingState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: PacingState) {
        self.state = state;
    }

    /// Returns the duration reported by the source, if known yet.
    #[must_use]
    pub fn measured_duration(&self) -> Option<f64> {
        self.measured_duration
    }

    /// Records the media duration if none is known yet.
    ///
    /// Returns true if the value was stored.
    pub(crate) fn learn_duration(&mut self, duration: Option<f64>) -> bool {
        if self.measured_duration.is_some() {
            return false;
        }
        let usable = duration.filter(|d| d.is_finite() && *d > 0.0);
        self.measured_duration = usable;
        usable.is_some()
    }

    /// Returns the time advanced per input, once computed.
    #[must_use]
    pub fn step_per_input(&self) -> Option<f64> {
        self.step_per_input
    }

    /// Stores the per-input step. Only the first call has an effect.
    ///
    /// Returns true if the value was stored.
    pub(crate) fn fix_step(&mut self, step: f64) -> bool {
        if self.step_per_input.is_some() {
            return false;
        }
        self.step_per_input = Some(step);
        true
    }

    /// Returns the number of inputs accepted so far.
    #[must_use]
    pub fn inputs_accepted(&self) -> u32 {
        self.inputs_accepted
    }

    /// Returns the number of inputs needed, or zero for unpaced segments.
    #[must_use]
    pub fn required_inputs(&self) -> u32 {
        self.segment.pacing.as_ref().map_or(0, |p| p.required_inputs)
    }

    /// Counts one input. Saturates at the required count.
    ///
    /// Returns the new count.
    pub(crate) fn accept_input(&mut self) -> u32 {
        if self.inputs_accepted < self.required_inputs() {
            self.inputs_accepted += 1;
        }
        self.inputs_accepted
    }

    /// Returns true once every required input was accepted.
    #[must_use]
    pub fn inputs_complete(&self) -> bool {
        self.inputs_accepted >= self.required_inputs()
    }

    /// Returns true once playback was paused at the checkpoint.
    #[must_use]
    pub fn checkpoint_crossed(&self) -> bool {
        self.checkpoint_crossed
    }

    /// Flags the checkpoint as crossed.
    ///
    /// Returns false if it was already flagged; callers must not pause again.
    pub(crate) fn cross_checkpoint(&mut self) -> bool {
        !std::mem::replace(&mut self.checkpoint_crossed, true)
    }

    /// Returns the input debouncer.
    #[must_use]
    pub fn debouncer(&self) -> &InputDebouncer {
        &self.debouncer
    }

    pub(crate) fn debouncer_mut(&mut self) -> &mut InputDebouncer {
        &mut self.debouncer
    }

    /// Returns the subscriptions held by this session.
    #[must_use]
    pub fn subscriptions(&self) -> &SessionSubscriptions {
        &self.subscriptions
    }

    /// Ends the session, releasing its subscriptions on `source`.
    pub(crate) fn close<S: MediaSource + ?Sized>(self, source: &mut S) {
        self.subscriptions.release(source);
    }
}
