//! Blocky terrain with an independent random height per column.
//!
//! Adjacent columns are uncorrelated, so chunk seams are expected.

use rand::Rng;
use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{chunk_rng, fill_column, WorldGenerator, BEDROCK_TOP, LOW_SEA_LEVEL};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::noise::WorldSeed;

/// Stone, dirt and grass over per-column random heights.
#[derive(Clone, Debug)]
pub struct CubicGenerator {
    air: BlockId,
    water: BlockId,
    stone: BlockId,
    dirt: BlockId,
    grass_block: BlockId,
    bazalt: BlockId,
}

impl CubicGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:cubic";

    /// Highest column height.
    pub const MAX_HEIGHT: i32 = 59;

    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Fails if a required block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        let [air, water, stone, dirt, grass_block, bazalt] = resolve_blocks(
            content,
            [
                "core:air",
                "base:water",
                "base:stone",
                "base:dirt",
                "base:grass_block",
                "base:bazalt",
            ],
        )?;
        Ok(Self {
            air,
            water,
            stone,
            dirt,
            grass_block,
            bazalt,
        })
    }

    fn block_at(&self, y: i32, height: i32) -> BlockId {
        if y <= BEDROCK_TOP {
            self.bazalt
        } else if y == height && y >= LOW_SEA_LEVEL {
            self.grass_block
        } else if y < height - 6 {
            self.stone
        } else if y < height {
            self.dirt
        } else if y < LOW_SEA_LEVEL {
            self.water
        } else {
            self.air
        }
    }
}

impl WorldGenerator for CubicGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, seed: WorldSeed) -> GenResult<()> {
        tracing::debug!(chunk_x, chunk_z, generator = Self::KEY, "generating chunk");
        let mut rng = chunk_rng(seed, chunk_x, chunk_z);
        let shape = grid.shape();
        for z in 0..shape.depth {
            for x in 0..shape.width {
                let height = rng.gen_range(1..=Self::MAX_HEIGHT);
                fill_column(grid, x, z, |y| self.block_at(y, height));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::test_support::{assert_valid, content, generate, id};

    #[test]
    fn test_column_layering() {
        let content = content();
        let generator = CubicGenerator::new(&content).unwrap();
        let [stone, dirt, grass, water, bazalt] =
            ["base:stone", "base:dirt", "base:grass_block", "base:water", "base:bazalt"].map(|n| id(&content, n));

        // Above sea level: dirt cap, grass on top.
        assert_eq!(generator.block_at(1, 50), bazalt);
        assert_eq!(generator.block_at(43, 50), stone);
        assert_eq!(generator.block_at(44, 50), dirt);
        assert_eq!(generator.block_at(49, 50), dirt);
        assert_eq!(generator.block_at(50, 50), grass);
        assert_eq!(generator.block_at(51, 50), 0);

        // Below sea level: water fills above the ground, no grass.
        assert_eq!(generator.block_at(20, 20), water);
        assert_eq!(generator.block_at(34, 20), water);
        assert_eq!(generator.block_at(35, 20), 0);
    }

    #[test]
    fn test_generated_chunk() {
        let content = content();
        let generator = CubicGenerator::new(&content).unwrap();
        let grid = generate(&generator, 4, -1, 2024);
        assert_valid(&content, &grid);

        let bazalt = id(&content, "base:bazalt");
        for z in 0..16 {
            for x in 0..16 {
                for y in 0..=2 {
                    assert_eq!(grid.get(x, y, z).map(|v| v.id), Some(bazalt));
                }
                let top = grid.column_height(x, z).unwrap();
                assert!(top <= CubicGenerator::MAX_HEIGHT as usize);
            }
        }
        assert_eq!(grid, generate(&generator, 4, -1, 2024));
    }
}
