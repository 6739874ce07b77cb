//! Loading and saving [`MonitorConfig`].
//!
//! The default location is managed by confy under the `eewatch` app name.
//! An explicit file can be given instead, in which case it is read as plain
//! TOML.

use std::fs;
use std::path::{Path, PathBuf};

use eewatch_types::MonitorConfig;
use thiserror::Error;

pub const APP_NAME: &str = "eewatch";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] confy::ConfyError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the user's configuration, creating it with defaults on first run.
pub fn load_config() -> Result<MonitorConfig, ConfigError> {
    Ok(confy::load(APP_NAME, None)?)
}

/// Where [`load_config`] reads from, if the platform has a config directory.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}

/// Load a TOML config file from an explicit path.
pub fn load_config_file(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
