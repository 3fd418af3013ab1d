//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`process`] - `ScriptedRunner`, a fake
//!   [`ProcessRunner`](crate::port::outbound::process::ProcessRunner).
//! - [`clock`] - `SteppingClock` for deterministic generation timestamps.
//! - [`domain`] - Builders for training rows and row streams.

pub mod clock;
pub mod domain;
pub mod process;
