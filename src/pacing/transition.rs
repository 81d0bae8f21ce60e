// SPDX-License-Identifier: MPL-2.0
//! Playlist handoff between segments.
//!
//! The [`TransitionManager`] owns the ordered list of segments. It starts the
//! first one, and each time the controller reports a completed session it
//! starts the next. A completion is consumed once: duplicates and reports
//! from sessions it did not start are ignored.

use super::controller::PlaybackController;
use super::session::SessionId;
use crate::application::port::{MediaSource, ProgressSink};
use crate::domain::error::PacingError;
use crate::domain::pacing::Segment;
use log::{debug, info};

/// What a handoff did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The segment at `index` was started as `session`.
    Started {
        /// Position in the playlist.
        index: usize,
        /// Session created for it.
        session: SessionId,
    },
    /// The playlist is exhausted and the controller was stopped.
    Finished,
    /// The completion was stale or already handled.
    Ignored,
}

/// Ordered playlist plus the position of the segment being played.
#[derive(Debug, Clone)]
pub struct TransitionManager {
    playlist: Vec<Segment>,
    cursor: Option<usize>,
    /// Session awaiting its completion report. Cleared when consumed.
    pending: Option<SessionId>,
    finished: bool,
}

impl TransitionManager {
    /// Creates a manager positioned before the first segment.
    #[must_use]
    pub fn new(playlist: Vec<Segment>) -> Self {
        Self {
            playlist,
            cursor: None,
            pending: None,
            finished: false,
        }
    }

    /// Returns the number of segments in the playlist.
    #[must_use]
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Returns true if the playlist has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// Returns the index of the segment most recently started.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns the segment most recently started.
    #[must_use]
    pub fn current_segment(&self) -> Option<&Segment> {
        self.cursor.and_then(|index| self.playlist.get(index))
    }

    /// Returns true once the last segment completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the segment that follows `index`, or `None` at the end.
    #[must_use]
    pub fn next_segment(&self, index: usize) -> Option<&Segment> {
        self.playlist.get(index + 1)
    }

    /// Starts the first segment.
    ///
    /// An empty playlist is finished immediately.
    ///
    /// # Errors
    ///
    /// Propagates the controller's start error. The cursor stays on the
    /// failed segment so the host may [`retry_current`](Self::retry_current).
    pub fn begin<S: MediaSource, P: ProgressSink>(
        &mut self,
        controller: &mut PlaybackController<S, P>,
    ) -> Result<Transition, PacingError> {
        self.finished = false;
        if self.playlist.is_empty() {
            self.finished = true;
            return Ok(Transition::Finished);
        }
        self.start_at(0, controller)
    }

    /// Hands off after `completed` finished playing.
    ///
    /// # Errors
    ///
    /// Propagates the controller's start error for the next segment.
    pub fn on_segment_completed<S: MediaSource, P: ProgressSink>(
        &mut self,
        completed: SessionId,
        controller: &mut PlaybackController<S, P>,
    ) -> Result<Transition, PacingError> {
        if self.pending != Some(completed) {
            debug!(
                "Ignoring completion of session {} (expecting {:?})",
                completed.value(),
                self.pending.map(SessionId::value)
            );
            return Ok(Transition::Ignored);
        }
        self.pending = None;

        let next = self.cursor.map_or(0, |index| index + 1);
        if next >= self.playlist.len() {
            info!("Playlist finished after {} segments", self.playlist.len());
            self.finished = true;
            controller.stop();
            return Ok(Transition::Finished);
        }
        self.start_at(next, controller)
    }

    /// Starts the current segment again, typically after a load failure.
    ///
    /// # Errors
    ///
    /// Propagates the controller's start error.
    pub fn retry_current<S: MediaSource, P: ProgressSink>(
        &mut self,
        controller: &mut PlaybackController<S, P>,
    ) -> Result<Transition, PacingError> {
        match self.cursor {
            Some(index) if !self.finished => self.start_at(index, controller),
            _ => Ok(Transition::Ignored),
        }
    }

    fn start_at<S: MediaSource, P: ProgressSink>(
        &mut self,
        index: usize,
        controller: &mut PlaybackController<S, P>,
    ) -> Result<Transition, PacingError> {
        self.cursor = Some(index);
        self.pending = None;
        let Some(segment) = self.playlist.get(index).cloned() else {
            return Ok(Transition::Ignored);
        };
        let session = controller.start_segment(segment)?;
        debug!("Playlist entry {} started as session {}", index, session.value());
        self.pending = Some(session);
        Ok(Transition::Started { index, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::ProgressEvent;
    use crate::domain::pacing::PacingState;
    use crate::infrastructure::simulated::{MediaScript, SimulatedMediaSource};
    use crate::pacing::Tuning;

    type Controller = PlaybackController<SimulatedMediaSource, Vec<ProgressEvent>>;

    fn controller() -> (Controller, SimulatedMediaSource) {
        let (source, _rx) = SimulatedMediaSource::new();
        for name in ["a.mp4", "b.mp4"] {
            source.add_media(name, MediaScript::with_duration(Some(2.0)));
        }
        let controller = PlaybackController::new(source.clone(), Vec::new(), Tuning::default());
        (controller, source)
    }

    fn playlist() -> Vec<Segment> {
        vec![Segment::passthrough("a.mp4"), Segment::passthrough("b.mp4")]
    }

    #[test]
    fn begin_starts_first_segment() {
        let (mut controller, source) = controller();
        let mut manager = TransitionManager::new(playlist());

        let transition = manager.begin(&mut controller).unwrap();

        assert!(matches!(transition, Transition::Started { index: 0, .. }));
        assert_eq!(source.loaded_locator().as_deref(), Some("a.mp4"));
    }

    #[test]
    fn completion_starts_next_then_finishes() {
        let (mut controller, source) = controller();
        let mut manager = TransitionManager::new(playlist());
        let Transition::Started { session: first, .. } = manager.begin(&mut controller).unwrap()
        else {
            panic!("first segment should start");
        };

        let second = manager.on_segment_completed(first, &mut controller).unwrap();
        let Transition::Started { index: 1, session } = second else {
            panic!("second segment should start, got {second:?}");
        };
        assert_eq!(source.loaded_locator().as_deref(), Some("b.mp4"));

        assert_eq!(
            manager.on_segment_completed(session, &mut controller).unwrap(),
            Transition::Finished
        );
        assert!(manager.is_finished());
        assert_eq!(controller.state(), PacingState::Idle);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let (mut controller, _source) = controller();
        let mut manager = TransitionManager::new(playlist());
        let Transition::Started { session: first, .. } = manager.begin(&mut controller).unwrap()
        else {
            panic!("first segment should start");
        };

        manager.on_segment_completed(first, &mut controller).unwrap();
        assert_eq!(
            manager.on_segment_completed(first, &mut controller).unwrap(),
            Transition::Ignored
        );
        assert_eq!(manager.current_index(), Some(1));
    }

    #[test]
    fn empty_playlist_finishes_immediately() {
        let (mut controller, _source) = controller();
        let mut manager = TransitionManager::new(Vec::new());
        assert_eq!(manager.begin(&mut controller).unwrap(), Transition::Finished);
    }

    #[test]
    fn load_failure_keeps_cursor_for_retry() {
        let (mut controller, source) = controller();
        let mut manager = TransitionManager::new(vec![Segment::passthrough("late.mp4")]);

        assert!(manager.begin(&mut controller).is_err());
        assert_eq!(manager.current_index(), Some(0));

        source.add_media("late.mp4", MediaScript::with_duration(Some(1.0)));
        let retried = manager.retry_current(&mut controller).unwrap();
        assert!(matches!(retried, Transition::Started { index: 0, .. }));
    }

    #[test]
    fn next_segment_is_pure_lookup() {
        let manager = TransitionManager::new(playlist());
        assert_eq!(manager.next_segment(0).map(|s| s.locator.as_str()), Some("b.mp4"));
        assert!(manager.next_segment(1).is_none());
    }
}
