//! Configuration and runtime validation command handlers.

pub mod config;
pub mod runtime;
