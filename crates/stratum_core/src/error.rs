//! # Core Error Types
//!
//! Errors raised by the content registry and the voxel encoding layer.

use thiserror::Error;

/// Errors raised while building or querying content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// A symbolic block name is not registered.
    #[error("missing block: {0}")]
    MissingBlock(String),

    /// A block name was registered twice.
    #[error("block already registered: {0}")]
    DuplicateBlock(String),

    /// The id space of the voxel encoding is exhausted.
    #[error("too many blocks: limit is {limit}")]
    TooManyBlocks {
        /// Maximum number of block definitions.
        limit: usize,
    },

    /// A content pack was declared twice.
    #[error("content pack declared twice: {0}")]
    DuplicatePack(String),

    /// A content pack depends on a pack that is not present.
    #[error("content pack {pack} depends on missing pack {dependency}")]
    MissingDependency {
        /// The pack declaring the dependency.
        pack: String,
        /// The absent dependency.
        dependency: String,
    },

    /// Content packs depend on each other in a cycle.
    #[error("content pack dependency cycle: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),

    /// A pack manifest could not be parsed.
    #[error("invalid content manifest: {0}")]
    InvalidManifest(String),
}

/// Errors raised by the voxel encoding layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Rotation index does not fit the rotation field.
    #[error("rotation {0} out of range")]
    RotationOutOfRange(u8),

    /// A user sub-field would spill outside the user bits region.
    #[error("user bits out of range: offset {offset}, width {width}")]
    UserBitsOutOfRange {
        /// Offset relative to the user bits base.
        offset: u32,
        /// Width of the sub-field in bits.
        width: u32,
    },

    /// A voxel buffer does not match the chunk shape.
    #[error("voxel buffer has {actual} cells, shape requires {expected}")]
    BufferSize {
        /// Cells required by the shape.
        expected: usize,
        /// Cells supplied.
        actual: usize,
    },

    /// A compressed chunk payload could not be decoded.
    #[error("corrupt chunk payload: {0}")]
    Corrupt(String),
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Result type for encoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;
