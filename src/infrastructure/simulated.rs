// SPDX-License-Identifier: MPL-2.0
//! In-memory adapter implementing the [`MediaSource`] port trait.
//!
//! [`SimulatedMediaSource`] plays scripted media on a virtual clock. It never
//! touches a decoder or the wall clock: position only moves when the host
//! calls [`SimulatedMediaSource::advance`].
//!
//! # Design Notes
//!
//! - The handle is cheap to clone; clones share one player
//! - `load` only starts preparation, `Ready` is emitted on the next `advance`
//! - `Ended` is emitted once per run to the end and re-armed by a seek
//! - Every call is logged for inspection until the log is switched off
//! - Notifications go to every live subscription of the matching kind over an
//!   unbounded tokio channel, the same way a real adapter would post them to
//!   the host's event loop
//!
//! [`MediaSource`]: crate::application::port::MediaSource

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::trace;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::application::port::MediaSource;
use crate::domain::error::PacingError;
use crate::domain::pacing::{NotificationKind, SourceNotification, SubscriptionId};

/// How a simulated clip behaves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaScript {
    /// Clip length in seconds. `None` plays forever and never ends.
    pub duration_secs: Option<f64>,
    /// Hide the duration until playback has moved at least once.
    pub duration_revealed_late: bool,
    /// Refuse to load with this reason.
    pub load_error: Option<String>,
}

impl MediaScript {
    /// A clip of the given length.
    #[must_use]
    pub fn with_duration(duration_secs: Option<f64>) -> Self {
        Self {
            duration_secs,
            ..Self::default()
        }
    }

    /// A clip that cannot be opened.
    #[must_use]
    pub fn broken(reason: impl Into<String>) -> Self {
        Self {
            load_error: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Reports no duration at ready time.
    #[must_use]
    pub fn revealed_late(mut self) -> Self {
        self.duration_revealed_late = true;
        self
    }
}

/// A call the controller made on the source, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Subscribe(NotificationKind),
    Unsubscribe(SubscriptionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Empty,
    Preparing,
    Ready,
}

#[derive(Debug)]
struct Player {
    catalog: HashMap<String, MediaScript>,
    loaded: Option<(String, MediaScript)>,
    phase: Phase,
    position: f64,
    playing: bool,
    end_reported: bool,
    next_subscription: u64,
    subscriptions: BTreeMap<SubscriptionId, NotificationKind>,
    log_calls: bool,
    calls: Vec<SourceCall>,
}

impl Player {
    fn duration(&self) -> Option<f64> {
        self.loaded.as_ref().and_then(|(_, script)| script.duration_secs)
    }

    fn record(&mut self, call: SourceCall) {
        if self.log_calls {
            self.calls.push(call);
        }
    }

    fn notify(&self, outbox: &UnboundedSender<SourceNotification>, kind: NotificationKind) {
        for (id, subscribed) in &self.subscriptions {
            if *subscribed == kind {
                trace!("Posting {} to subscription {}", kind, id.value());
                let _ = outbox.send(SourceNotification::new(*id, kind));
            }
        }
    }
}

/// Scripted media player on a virtual clock.
#[derive(Debug, Clone)]
pub struct SimulatedMediaSource {
    player: Arc<Mutex<Player>>,
    outbox: UnboundedSender<SourceNotification>,
}

impl SimulatedMediaSource {
    /// Creates an empty player and the receiving end of its notifications.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<SourceNotification>) {
        let (outbox, inbox) = mpsc::unbounded_channel();
        let player = Player {
            catalog: HashMap::new(),
            loaded: None,
            phase: Phase::Empty,
            position: 0.0,
            playing: false,
            end_reported: false,
            next_subscription: 0,
            subscriptions: BTreeMap::new(),
            log_calls: true,
            calls: Vec::new(),
        };
        let source = Self {
            player: Arc::new(Mutex::new(player)),
            outbox,
        };
        (source, inbox)
    }

    /// Makes `locator` loadable.
    pub fn add_media(&self, locator: impl Into<String>, script: MediaScript) {
        self.lock().catalog.insert(locator.into(), script);
    }

    /// Moves the virtual clock forward by `elapsed`.
    ///
    /// A clip being prepared becomes ready instead of moving.
    pub fn advance(&self, elapsed: Duration) {
        let mut player = self.lock();
        let phase = player.phase;
        match phase {
            Phase::Empty => {}
            Phase::Preparing => {
                player.phase = Phase::Ready;
                player.notify(&self.outbox, NotificationKind::Ready);
            }
            Phase::Ready if player.playing => {
                player.position += elapsed.as_secs_f64();
                if let Some(duration) = player.duration() {
                    if player.position >= duration {
                        player.position = duration;
                        player.playing = false;
                        if !player.end_reported {
                            player.end_reported = true;
                            player.notify(&self.outbox, NotificationKind::Ended);
                        }
                    }
                }
            }
            Phase::Ready => {}
        }
    }

    /// Posts a notification of `kind` to every live subscription, whatever
    /// the player is doing. Used to replay duplicates and failures.
    pub fn emit(&self, kind: NotificationKind) {
        self.lock().notify(&self.outbox, kind);
    }

    /// Returns the current position in seconds.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.lock().position
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    /// Returns the number of subscriptions not yet released.
    #[must_use]
    pub fn live_subscriptions(&self) -> usize {
        self.lock().subscriptions.len()
    }

    /// Returns the locator of the loaded clip.
    #[must_use]
    pub fn loaded_locator(&self) -> Option<String> {
        self.lock().loaded.as_ref().map(|(locator, _)| locator.clone())
    }

    /// Turns the call log on or off. It is on for a new player.
    ///
    /// Turning it off also drops what was recorded so far.
    pub fn set_call_log(&self, enabled: bool) {
        let mut player = self.lock();
        player.log_calls = enabled;
        if !enabled {
            player.calls = Vec::new();
        }
    }

    /// Returns every call recorded while the call log was on.
    #[must_use]
    pub fn calls(&self) -> Vec<SourceCall> {
        self.lock().calls.clone()
    }

    /// Returns every seek target, in order.
    #[must_use]
    pub fn seeks(&self) -> Vec<f64> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                SourceCall::Seek(target) => Some(*target),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Player> {
        self.player.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MediaSource for SimulatedMediaSource {
    fn load(&mut self, locator: &str) -> Result<(), PacingError> {
        let mut player = self.lock();
        player.record(SourceCall::Load(locator.to_string()));
        player.playing = false;
        player.phase = Phase::Empty;
        player.loaded = None;

        let script = player
            .catalog
            .get(locator)
            .cloned()
            .ok_or_else(|| PacingError::load_failure(locator, "no such media"))?;
        if let Some(reason) = &script.load_error {
            return Err(PacingError::load_failure(locator, reason.clone()));
        }

        player.loaded = Some((locator.to_string(), script));
        player.phase = Phase::Preparing;
        player.position = 0.0;
        player.end_reported = false;
        Ok(())
    }

    fn play(&mut self) {
        let mut player = self.lock();
        player.record(SourceCall::Play);
        if player.phase == Phase::Ready {
            player.playing = true;
        }
    }

    fn pause(&mut self) {
        let mut player = self.lock();
        player.record(SourceCall::Pause);
        player.playing = false;
    }

    fn seek(&mut self, position_secs: f64) {
        let mut player = self.lock();
        player.record(SourceCall::Seek(position_secs));
        let mut target = position_secs.max(0.0);
        if let Some(duration) = player.duration() {
            target = target.min(duration);
            if target < duration {
                player.end_reported = false;
            }
        }
        player.position = target;
    }

    fn current_time(&self) -> f64 {
        self.lock().position
    }

    fn duration(&self) -> Option<f64> {
        let player = self.lock();
        if player.phase != Phase::Ready {
            return None;
        }
        let hidden = player
            .loaded
            .as_ref()
            .is_some_and(|(_, script)| script.duration_revealed_late)
            && player.position <= 0.0;
        if hidden {
            None
        } else {
            player.duration()
        }
    }

    fn subscribe(&mut self, kind: NotificationKind) -> SubscriptionId {
        let mut player = self.lock();
        player.next_subscription += 1;
        let id = SubscriptionId::new(player.next_subscription);
        player.subscriptions.insert(id, kind);
        player.record(SourceCall::Subscribe(kind));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        let mut player = self.lock();
        player.subscriptions.remove(&id);
        player.record(SourceCall::Unsubscribe(id));
    }
}
