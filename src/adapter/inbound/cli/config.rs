//! Configuration loading for CLI handlers.

use std::path::Path;

use super::paths;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Load the configuration a command was pointed at.
///
/// The default location may be absent, in which case built-in defaults and
/// environment overrides apply. An explicitly given path must exist.
#[allow(clippy::result_large_err)]
pub fn load(path: &Path) -> Result<Config> {
    if path == paths::default_config() {
        Config::load_or_default(path)
    } else {
        Config::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load(Path::new("/nonexistent/simlife.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    }

    #[test]
    fn explicit_path_is_parsed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[model]\ntrain_timeout_secs = 5\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.model.train_timeout_secs, 5);
    }
}
