// SPDX-License-Identifier: MPL-2.0
//! Checkpoint-paced playback engine.
//!
//! # Architecture
//!
//! - [`controller`]: The state machine driving one media source
//! - [`session`]: Counters and subscriptions of one segment run
//! - [`scheduler`]: Per-input step and seek target arithmetic
//! - [`debouncer`]: Auto-re-pause decision after inputs
//! - [`transition`]: Playlist handoff between segments
//! - [`driver`]: Tokio event loop feeding the controller
//!
//! The controller is synchronous and host-driven. Hosts with their own event
//! loop call it directly; others can hand everything to [`PacingDriver`].

pub mod controller;
pub mod debouncer;
pub mod driver;
pub mod scheduler;
pub mod session;
pub mod transition;
pub mod tuning;

pub use controller::{InputOutcome, NotificationOutcome, PlaybackController, TickOutcome};
pub use debouncer::InputDebouncer;
pub use driver::{AdvanceRequest, PacingDriver, RunSummary};
pub use scheduler::{clamp_target, compute_step};
pub use session::{PlaybackSession, SessionId, SessionSubscriptions};
pub use transition::{Transition, TransitionManager};
pub use tuning::Tuning;
