//! Filesystem adapters.

pub mod store;
