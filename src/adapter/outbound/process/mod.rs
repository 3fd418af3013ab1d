//! Child process adapters.

pub mod runner;
