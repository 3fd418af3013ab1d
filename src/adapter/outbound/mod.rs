//! Outbound adapters implementing the driven ports.

pub mod fs;
pub mod process;
pub mod source;
