//! Training data source adapters.

pub mod jsonl;
