//! Adapters: inbound (CLI) and outbound (processes, filesystem, sources).

pub mod inbound;
pub mod outbound;
