//! # STRATUM Core
//!
//! The voxel data contract shared by generation, gameplay and scripting.
//!
//! ## Core Components
//!
//! - `Voxel`: block id plus a packed state word (rotation, user bits)
//! - `ChunkShape`: chunk dimensions and local coordinate addressing
//! - `VoxelGrid`: the caller-owned buffer a generator fills
//! - `ContentRegistry`: symbolic block names bound to runtime ids
//! - `ContentPack`: block sets loaded in dependency order
//! - `BlockAccess`: sentinel-based runtime access for scripts
//!
//! ## Example
//!
//! ```rust
//! use stratum_core::{ChunkShape, ContentRegistry, Voxel, VoxelGrid};
//!
//! let content = ContentRegistry::with_base_content();
//! let stone = content.require_block("base:stone").unwrap();
//!
//! let mut grid = VoxelGrid::new(ChunkShape::STANDARD);
//! let mut voxel = Voxel::new(stone);
//! voxel.set_user_bits(3, 0, 2).unwrap();
//! grid.set(0, 0, 0, voxel);
//!
//! assert_eq!(grid.get(0, 0, 0).unwrap().user_bits(0, 2).unwrap(), 3);
//! assert_eq!(grid.get(16, 0, 0), None);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod access;
pub mod content;
pub mod error;
pub mod grid;
pub mod packs;
pub mod shape;
pub mod voxel;

pub use access::{BlockAccess, NO_VOXEL};
pub use content::{Axis, BlockDef, ContentRegistry, CoordSystem, RotationProfile, AIR_NAME};
pub use error::{ContentError, ContentResult, EncodingError, EncodingResult};
pub use grid::VoxelGrid;
pub use packs::{base_blocks, resolve_load_order, ContentPack, BASE_PACK};
pub use shape::{ChunkShape, LocalPos, CHUNK_D, CHUNK_H, CHUNK_W};
pub use voxel::{
    decode_rotation, decode_user_bits, encode_rotation, encode_user_bits, BlockId, Voxel,
    BLOCK_AIR, MAX_ROTATION, USER_BITS_OFFSET, USER_BITS_WIDTH,
};
