//! Process-level error types.
//!
//! Generation and export errors live next to their modules
//! ([`crate::footprint::GenerateError`], [`crate::kicad::OutputError`]);
//! this module holds the configuration errors raised at start-up and the
//! errors of the one-shot `generate` command.

use std::path::PathBuf;

use thiserror::Error;

use crate::footprint::{GenerateError, ValidationError};
use crate::kicad::OutputError;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors from the `generate` command.
#[derive(Error, Debug)]
pub enum CliError {
    /// Parameter file could not be read.
    #[error("failed to read parameter file: {path}")]
    ParamsRead {
        /// Path to the parameter file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Parameter file is not a JSON object.
    #[error("failed to parse parameter file: {path}")]
    ParamsParse {
        /// Path to the parameter file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A parameter value is neither a string nor a number.
    #[error("invalid value in parameter file: {path}")]
    ParamsValue {
        /// Path to the parameter file.
        path: PathBuf,
        /// The offending parameter.
        #[source]
        source: ValidationError,
    },

    /// Footprint generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Footprint export failed.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The footprint could not be serialised to JSON.
    #[error("failed to serialise footprint")]
    Serialise(#[source] serde_json::Error),
}
