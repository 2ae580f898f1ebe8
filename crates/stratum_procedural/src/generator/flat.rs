//! Constant-height terrain. Baseline and test fixture.

use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{fill_column, WorldGenerator};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::noise::WorldSeed;

/// Fills every column with one block below a fixed height.
#[derive(Clone, Debug)]
pub struct FlatGenerator {
    air: BlockId,
    ground: BlockId,
    height: i32,
}

impl FlatGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:flat";

    /// Default ground height.
    pub const DEFAULT_HEIGHT: i32 = 40;

    /// Ground block name.
    pub const GROUND: &'static str = "base:stone";

    /// Creates the generator with [`Self::DEFAULT_HEIGHT`].
    ///
    /// # Errors
    ///
    /// Fails if the ground block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        Self::with_height(content, Self::DEFAULT_HEIGHT)
    }

    /// Creates the generator with a custom ground height.
    ///
    /// # Errors
    ///
    /// Fails if the ground block is not registered.
    pub fn with_height(content: &ContentRegistry, height: i32) -> GenResult<Self> {
        let [air, ground] = resolve_blocks(content, ["core:air", Self::GROUND])?;
        Ok(Self { air, ground, height })
    }

    /// Ground height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }
}

impl WorldGenerator for FlatGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, _seed: WorldSeed) -> GenResult<()> {
        tracing::debug!(chunk_x, chunk_z, generator = Self::KEY, "generating chunk");
        let shape = grid.shape();
        for z in 0..shape.depth {
            for x in 0..shape.width {
                fill_column(grid, x, z, |y| if y < self.height { self.ground } else { self.air });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stratum_core::ChunkShape;

    use super::*;
    use crate::generator::test_support::{assert_valid, content, generate, id};

    #[test]
    fn test_flat_layers() {
        let content = content();
        let generator = FlatGenerator::new(&content).unwrap();
        let grid = generate(&generator, -3, 9, 1);
        let stone = id(&content, "base:stone");

        assert_valid(&content, &grid);
        assert_eq!(grid.get(0, 0, 0).map(|v| v.id), Some(stone));
        assert_eq!(grid.get(15, 39, 15).map(|v| v.id), Some(stone));
        assert!(grid.get(7, 40, 7).is_some_and(|v| v.is_air()));
        assert_eq!(grid.count(stone), 40 * 256);
    }

    #[test]
    fn test_height_clamped_by_shape() {
        let content = content();
        let generator = FlatGenerator::with_height(&content, 500).unwrap();
        let mut grid = VoxelGrid::new(ChunkShape::new(2, 2, 8));
        generator.generate(&mut grid, 0, 0, WorldSeed::default()).unwrap();
        assert!(grid.voxels().iter().all(|v| !v.is_air()));
    }

    #[test]
    fn test_overwrites_previous_contents() {
        let content = content();
        let generator = FlatGenerator::with_height(&content, 1).unwrap();
        let mut grid = VoxelGrid::new(ChunkShape::new(2, 2, 4));
        grid.voxels_mut().fill(stratum_core::Voxel::with_states(3, 0xFF));
        generator.generate(&mut grid, 0, 0, WorldSeed::default()).unwrap();
        assert_valid(&content, &grid);
        assert_eq!(grid.count(0), 12);
    }
}
