//! Periodic retraining.

pub mod config;
pub mod service;
