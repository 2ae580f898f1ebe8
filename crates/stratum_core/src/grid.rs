//! # Voxel Grid
//!
//! The caller-owned voxel buffer a generator fills.
//!
//! ## Payload Format
//!
//! [`VoxelGrid::encode_compressed`] stores every voxel as its raw
//! `(id, states)` pair in index order, LZ4-compressed with a size prefix.
//! Terrain compresses roughly 10:1.

use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use crate::error::{EncodingError, EncodingResult};
use crate::shape::ChunkShape;
use crate::voxel::Voxel;

/// A chunk-sized buffer of voxels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Dimensions of the buffer.
    shape: ChunkShape,
    /// Voxels in `(y * depth + z) * width + x` order.
    voxels: Box<[Voxel]>,
}

impl VoxelGrid {
    /// Allocates an all-air grid.
    #[must_use]
    pub fn new(shape: ChunkShape) -> Self {
        Self {
            shape,
            voxels: vec![Voxel::AIR; shape.volume()].into_boxed_slice(),
        }
    }

    /// Wraps an existing voxel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::BufferSize`] if the buffer length does not
    /// match the shape.
    pub fn from_voxels(shape: ChunkShape, voxels: Vec<Voxel>) -> EncodingResult<Self> {
        if voxels.len() != shape.volume() {
            return Err(EncodingError::BufferSize {
                expected: shape.volume(),
                actual: voxels.len(),
            });
        }
        Ok(Self {
            shape,
            voxels: voxels.into_boxed_slice(),
        })
    }

    /// Dimensions of the grid.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> ChunkShape {
        self.shape
    }

    /// All voxels in index order.
    #[inline]
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// All voxels in index order, mutably.
    #[inline]
    pub fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    /// Gets the voxel at a local coordinate.
    ///
    /// Returns `None` for coordinates outside the chunk.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Voxel> {
        self.shape.checked_index(x, y, z).map(|i| self.voxels[i])
    }

    /// Gets a mutable reference to the voxel at a local coordinate.
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut Voxel> {
        let index = self.shape.checked_index(x, y, z)?;
        Some(&mut self.voxels[index])
    }

    /// Sets the voxel at a local coordinate.
    ///
    /// Returns false (and changes nothing) if the coordinate is outside the chunk.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, voxel: Voxel) -> bool {
        match self.get_mut(x, y, z) {
            Some(slot) => {
                *slot = voxel;
                true
            }
            None => false,
        }
    }

    /// Resets every voxel to air.
    pub fn clear(&mut self) {
        self.voxels.fill(Voxel::AIR);
    }

    /// Y of the highest non-air voxel in a column.
    #[must_use]
    pub fn column_height(&self, x: usize, z: usize) -> Option<usize> {
        if x >= self.shape.width || z >= self.shape.depth {
            return None;
        }
        (0..self.shape.height)
            .rev()
            .find(|&y| !self.voxels[self.shape.index(x, y, z)].is_air())
    }

    /// Number of voxels holding `id`.
    #[must_use]
    pub fn count(&self, id: u16) -> usize {
        self.voxels.iter().filter(|v| v.id == id).count()
    }

    /// Compresses the grid into a compact payload.
    #[must_use]
    pub fn encode_compressed(&self) -> Vec<u8> {
        compress_prepend_size(bytemuck::cast_slice::<Voxel, u8>(&self.voxels))
    }

    /// Restores a grid from [`Self::encode_compressed`] output.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Corrupt`] if decompression fails and
    /// [`EncodingError::BufferSize`] if the payload does not match `shape`.
    pub fn decode_compressed(shape: ChunkShape, payload: &[u8]) -> EncodingResult<Self> {
        let bytes = decompress_size_prepended(payload)
            .map_err(|e| EncodingError::Corrupt(e.to_string()))?;

        let voxel_size = std::mem::size_of::<Voxel>();
        if bytes.len() % voxel_size != 0 {
            return Err(EncodingError::Corrupt(format!(
                "payload length {} is not a multiple of {voxel_size}",
                bytes.len()
            )));
        }

        // The decompressed Vec<u8> has no alignment guarantee for Voxel.
        let voxels: Vec<Voxel> = bytes
            .chunks_exact(voxel_size)
            .map(bytemuck::pod_read_unaligned::<Voxel>)
            .collect();
        Self::from_voxels(shape, voxels)
    }
}
