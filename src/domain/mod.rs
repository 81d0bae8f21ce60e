// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core pacing rules with no media backend dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde` derives for configuration, it depends on `std` only.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`PacingError`](error::PacingError))
//! - [`pacing`]: Pacing types ([`Segment`](pacing::Segment),
//!   [`PacingState`](pacing::PacingState), [`HoldWindow`](pacing::HoldWindow))

pub mod error;
pub mod pacing;
