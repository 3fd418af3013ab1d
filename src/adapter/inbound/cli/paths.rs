//! Path utilities for simlife.
//!
//! Configuration lives under `~/.simlife/config.toml`. Model generations live
//! wherever `model.root` points.

use std::path::PathBuf;

/// Returns the simlife home directory (`~/.simlife/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".simlife")
}

/// Returns the default config file path (`~/.simlife/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
