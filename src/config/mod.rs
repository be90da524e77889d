//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path given as the `CONFIG_FILE` CLI argument
//! 2. Default location:
//!    - **Linux/macOS:** `~/.footprint-synth/config.json`
//!    - **Windows:** `%USERPROFILE%\.footprint-synth\config.json`
//!
//! # Example Configuration
//!
//! ```json
//! {
//!   "allowed_paths": ["/home/user/kicad/footprints.pretty"],
//!   "style": { "courtyard_margin": 0.5 },
//!   "logging": { "level": "info" }
//! }
//! ```

mod settings;

pub use settings::{Config, LoggingConfig};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.footprint-synth/`
/// - **Windows:** `%USERPROFILE%\.footprint-synth\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".footprint-synth"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None`, uses the platform-specific default location.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - A style value is not positive or the log level is unknown
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path().ok_or_else(|| ConfigError::NotFound {
            path: PathBuf::from("<default config path>"),
        })?,
    };

    if !config_path.exists() {
        return Err(ConfigError::NotFound { path: config_path });
    }

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    config.validate()?;

    Ok(config)
}

/// Loads the named configuration file, or the default one if it exists.
///
/// A missing default file yields the built-in defaults; a missing file that
/// was named explicitly is still an error.
///
/// # Errors
///
/// Returns any error from [`load_config`] other than a missing default file.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match load_config(path) {
        Err(ConfigError::NotFound { path: missing }) if path.is_none() => {
            debug!(path = %missing.display(), "no configuration file, using defaults");
            Ok(Config::default())
        }
        other => other,
    }
}
