//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod generations;
pub mod output;
pub mod paths;
pub mod predict;
pub mod run;
pub mod train;
