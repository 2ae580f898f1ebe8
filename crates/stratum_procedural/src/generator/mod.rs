//! # Generator Strategies
//!
//! Every generator fills a caller-owned [`VoxelGrid`] for one chunk.
//!
//! ## Contract
//!
//! - Every cell is written; rotation and user bits are left cleared.
//! - Output is a pure function of `(grid shape, chunk_x, chunk_z, seed)`
//!   and the block ids bound at construction.
//! - Randomness comes from a [`ChaCha8Rng`] seeded per chunk, never from
//!   global state.
//! - Noise-driven variants compute their height fields over the chunk
//!   footprint plus [`PADDING`] columns on every side.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stratum_core::{BlockId, ChunkShape, Voxel, VoxelGrid};

use crate::error::{GenResult, GenerationError};
use crate::heightmap::BorderedMap;
use crate::noise::WorldSeed;

mod cubic;
mod debris;
mod default;
mod flat;
mod ocean;
mod space;
mod tropical;

pub use cubic::CubicGenerator;
pub use debris::DebrisGenerator;
pub use default::DefaultGenerator;
pub use flat::FlatGenerator;
pub use ocean::OceanGenerator;
pub use space::SpaceGenerator;
pub use tropical::TropicalGenerator;

/// Height-field border around the chunk footprint, in columns.
pub const PADDING: usize = 8;

/// Sea level of the column-random generators.
pub const LOW_SEA_LEVEL: i32 = 35;

/// Layers at and below this Y are bedrock.
pub const BEDROCK_TOP: i32 = 2;

/// A chunk generation strategy.
pub trait WorldGenerator: Send + Sync {
    /// Registry key of the strategy.
    fn key(&self) -> &'static str;

    /// Fills `grid` with the chunk at `(chunk_x, chunk_z)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::OutOfWindow`] if the strategy
    /// reads a height-field column outside its padded window, or
    /// [`crate::GenerationError::CoordinateOverflow`] if the chunk's world
    /// coordinates do not fit in `i32`.
    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, seed: WorldSeed) -> GenResult<()>;
}

/// Random stream of one chunk.
#[must_use]
pub fn chunk_rng(seed: WorldSeed, chunk_x: i32, chunk_z: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.derive_chunk(chunk_x, chunk_z).value())
}

/// World origin of a chunk and its zeroed, padded height-field window.
///
/// World X of local column `x` is `origin_x + x as i32`, which cannot
/// overflow once the window exists.
pub(crate) fn chunk_window(shape: ChunkShape, chunk_x: i32, chunk_z: i32) -> GenResult<(i32, i32, BorderedMap)> {
    let window = shape.origin_x(chunk_x).zip(shape.origin_z(chunk_z)).and_then(|(x, z)| {
        BorderedMap::for_chunk(x, z, shape.width, shape.depth, PADDING).map(|map| (x, z, map))
    });
    window.ok_or_else(|| {
        tracing::warn!(chunk_x, chunk_z, "chunk window overflows world coordinates");
        GenerationError::CoordinateOverflow { chunk_x, chunk_z }
    })
}

/// Writes one column bottom-up from a per-layer block rule.
pub(crate) fn fill_column(grid: &mut VoxelGrid, x: usize, z: usize, mut block_at: impl FnMut(i32) -> BlockId) {
    let shape = grid.shape();
    let voxels = grid.voxels_mut();
    for y in 0..shape.height {
        voxels[shape.index(x, y, z)] = Voxel::new(block_at(y as i32));
    }
}

/// Integer part of a height, truncated toward zero.
#[inline]
pub(crate) fn surface_of(height: f64) -> i32 {
    height as i32
}
