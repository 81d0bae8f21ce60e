// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the pacing engine remains
//! independent of concrete players and views.
//!
//! # Available Ports
//!
//! - [`media_source`]: Playable media handle with ready/ended notifications
//! - [`progress`]: Progress and affordance visibility for the view layer
//!
//! # Design Notes
//!
//! - All traits use domain types only (no player handles, no widget types)
//! - Methods never block; asynchronous outcomes arrive later as notifications
//! - No `async fn` - the controller is driven by its host's event loop

pub mod media_source;
pub mod progress;

// Re-export main types for convenience
pub use media_source::MediaSource;
pub use progress::{ProgressEvent, ProgressSink};
