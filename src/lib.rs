// SPDX-License-Identifier: MPL-2.0
//! `checkpace` plays video segments that stop at a checkpoint and only move
//! on as the viewer sends discrete "advance" inputs.
//!
//! Each input moves playback forward by an evenly computed step. Once enough
//! inputs arrived the segment plays out on its own and hands off to the next
//! one in the playlist.

#![doc(html_root_url = "https://docs.rs/checkpace/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod pacing;

#[cfg(test)]
pub(crate) mod test_utils;
