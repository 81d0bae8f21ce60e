// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: Scripted media on a virtual clock (implements [`MediaSource`])
//!
//! Progress sinks for `Vec` and tokio channels live next to the
//! [`ProgressSink`] trait itself.
//!
//! [`MediaSource`]: crate::application::port::MediaSource
//! [`ProgressSink`]: crate::application::port::ProgressSink

pub mod simulated;

pub use simulated::{MediaScript, SimulatedMediaSource, SourceCall};
