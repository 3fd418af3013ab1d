//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: external model
//! processes, the generation store, the clock and training data sources.

pub mod clock;
pub mod process;
pub mod source;
pub mod store;
