//! # Host Error Types

use std::path::PathBuf;

use stratum_core::ContentError;
use stratum_procedural::GenerationError;
use thiserror::Error;

/// Errors raised while loading a world configuration and bootstrapping it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration or manifest file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The world configuration is not valid TOML for [`crate::WorldConfig`].
    #[error("invalid world config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but cannot be used.
    #[error("invalid world config: {0}")]
    Invalid(String),

    /// Content packs failed to load.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The generator could not be selected or constructed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Result type for host operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
