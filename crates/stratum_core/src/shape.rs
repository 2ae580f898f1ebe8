//! # Chunk Addressing
//!
//! Chunks are `width x depth x height` voxels stored as a flat array.
//!
//! ```text
//! index = (y * depth + z) * width + x
//! ```
//!
//! Horizontal layers are contiguous, so a column walk strides by
//! `width * depth`.

use serde::{Deserialize, Serialize};

/// Default chunk width in voxels.
pub const CHUNK_W: usize = 16;

/// Default chunk depth in voxels.
pub const CHUNK_D: usize = 16;

/// Default chunk height in voxels.
pub const CHUNK_H: usize = 256;

/// Local voxel position inside a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// Local X (0..width).
    pub x: usize,
    /// Local Y (0..height).
    pub y: usize,
    /// Local Z (0..depth).
    pub z: usize,
}

impl LocalPos {
    /// Creates a new local position.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

/// Dimensions of a chunk. Owned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkShape {
    /// Extent along X.
    pub width: usize,
    /// Extent along Z.
    pub depth: usize,
    /// Extent along Y.
    pub height: usize,
}

impl ChunkShape {
    /// The 16x16x256 shape used by the stock world.
    pub const STANDARD: Self = Self::new(CHUNK_W, CHUNK_D, CHUNK_H);

    /// Creates a new chunk shape.
    #[inline]
    #[must_use]
    pub const fn new(width: usize, depth: usize, height: usize) -> Self {
        Self { width, depth, height }
    }

    /// Number of voxels in the chunk.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.width * self.depth * self.height
    }

    /// Number of columns in the chunk footprint.
    #[inline]
    #[must_use]
    pub const fn columns(self) -> usize {
        self.width * self.depth
    }

    /// Returns true if the local coordinate lies inside the chunk.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Maps a local coordinate to its flat index.
    ///
    /// The coordinate must be inside the chunk; use [`Self::checked_index`]
    /// for untrusted input.
    #[inline]
    #[must_use]
    pub const fn index(self, x: usize, y: usize, z: usize) -> usize {
        (y * self.depth + z) * self.width + x
    }

    /// Maps a local coordinate to its flat index, or `None` if out of range.
    #[inline]
    #[must_use]
    pub const fn checked_index(self, x: usize, y: usize, z: usize) -> Option<usize> {
        if self.contains(x, y, z) {
            Some(self.index(x, y, z))
        } else {
            None
        }
    }

    /// Maps signed local coordinates to a flat index, or `None` if out of range.
    #[inline]
    #[must_use]
    pub fn signed_index(self, x: i32, y: i32, z: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let z = usize::try_from(z).ok()?;
        self.checked_index(x, y, z)
    }

    /// Maps a flat index back to its local coordinate.
    #[inline]
    #[must_use]
    pub const fn coord(self, index: usize) -> LocalPos {
        let x = index % self.width;
        let z = (index / self.width) % self.depth;
        let y = index / (self.width * self.depth);
        LocalPos { x, y, z }
    }

    /// World X of the chunk origin, or `None` if it overflows `i32`.
    #[inline]
    #[must_use]
    pub fn origin_x(self, chunk_x: i32) -> Option<i32> {
        i32::try_from(self.width).ok()?.checked_mul(chunk_x)
    }

    /// World Z of the chunk origin, or `None` if it overflows `i32`.
    #[inline]
    #[must_use]
    pub fn origin_z(self, chunk_z: i32) -> Option<i32> {
        i32::try_from(self.depth).ok()?.checked_mul(chunk_z)
    }
}

impl Default for ChunkShape {
    fn default() -> Self {
        Self::STANDARD
    }
}
