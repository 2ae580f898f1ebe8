//! # Generation Error Types

use stratum_core::ContentError;
use thiserror::Error;

/// Errors raised while selecting, constructing or running a generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Content lookup failed while binding block ids.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// No generator is registered under the key.
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    /// A generator key was registered twice.
    #[error("generator already registered: {0}")]
    DuplicateGenerator(String),

    /// A height-field access fell outside the padded window.
    ///
    /// This is a padding bug in the generator, never a recoverable state.
    #[error("height field access at ({x}, {z}) outside window [{min_x}, {max_x}) x [{min_z}, {max_z})")]
    OutOfWindow {
        /// World X of the access.
        x: i32,
        /// World Z of the access.
        z: i32,
        /// First world X inside the window.
        min_x: i32,
        /// First world Z inside the window.
        min_z: i32,
        /// One past the last world X inside the window.
        max_x: i32,
        /// One past the last world Z inside the window.
        max_z: i32,
    },

    /// The chunk's padded window does not fit in `i32` world coordinates.
    #[error("chunk ({chunk_x}, {chunk_z}) is outside the addressable world")]
    CoordinateOverflow {
        /// Chunk X coordinate.
        chunk_x: i32,
        /// Chunk Z coordinate.
        chunk_z: i32,
    },
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenerationError>;
