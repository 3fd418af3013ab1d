//! Simlife - lifecycle manager for an externally trained product-similarity model.
//!
//! The model itself is trained and queried by external interpreter scripts.
//! This crate owns everything around them: checking the interpreter is
//! installed, streaming sales rows into the trainer's CSV, keeping exactly one
//! timestamped model generation on disk, and turning the predictor's JSON
//! output into product identifiers.
//!
//! # Architecture
//!
//! - [`domain`] - Rows, identifiers and model generations
//! - [`port`] - The [`SimilarityModel`](port::inbound::similarity::SimilarityModel)
//!   entry point and the outbound process, store, clock and source traits
//! - [`application`] - Probe, training pipeline, prediction invoker, gateway
//!   and the periodic scheduler
//! - [`adapter`] - Tokio processes, filesystem store, JSON-lines source, CLI
//! - [`infrastructure`] - Configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use simlife::application::similarity::config::ModelConfig;
//! use simlife::domain::id::ProductId;
//! use simlife::infrastructure::bootstrap;
//! use simlife::port::inbound::similarity::SimilarityModel;
//!
//! # async fn run() -> simlife::error::Result<()> {
//! let gateway = bootstrap::build_gateway(&ModelConfig::default());
//! let similar = gateway.predict(&ProductId::new("p-1")).await?;
//! println!("{similar:?}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
