//! Domain types for the similarity model lifecycle. Free of I/O frameworks.

pub mod error;
pub mod generation;
pub mod id;
pub mod row;
