//! Inbound ports (driving side): interfaces exposed to callers.

pub mod similarity;
