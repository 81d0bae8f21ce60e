// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the pacing engine talks through.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The pacing engine receives port implementations by injection
//!
//! # Example
//!
//! ```ignore
//! use checkpace::application::port::{MediaSource, ProgressSink};
//! use checkpace::pacing::{PlaybackController, Tuning};
//!
//! // Infrastructure implements the port traits
//! struct PlayerAdapter { /* ... */ }
//! impl MediaSource for PlayerAdapter { /* ... */ }
//!
//! let controller = PlaybackController::new(PlayerAdapter::new(), Vec::new(), Tuning::default());
//! ```

pub mod port;
