//! Similarity model lifecycle services.
//!
//! Trains product-similarity models from historical sales and serves
//! nearest-neighbor predictions through an external model process.

pub mod config;
pub mod dataset;
pub mod gateway;
pub mod prediction;
pub mod probe;
pub mod training;
