//! Open sea over a shallow random seabed.

use rand::Rng;
use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{chunk_rng, fill_column, WorldGenerator, BEDROCK_TOP};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::noise::WorldSeed;
use crate::terrain::NOISE_SEA_LEVEL;

/// Water down to a sand-covered stone floor.
#[derive(Clone, Debug)]
pub struct OceanGenerator {
    air: BlockId,
    water: BlockId,
    stone: BlockId,
    sand: BlockId,
    bazalt: BlockId,
}

impl OceanGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:ocean";

    /// Sea level.
    pub const SEA_LEVEL: i32 = NOISE_SEA_LEVEL;

    /// Shallowest water depth over the seabed.
    pub const MIN_DEPTH: i32 = 8;

    /// Deepest water depth over the seabed.
    pub const MAX_DEPTH: i32 = 24;

    /// Thickness of the sand layer.
    pub const SAND_DEPTH: i32 = 4;

    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Fails if a required block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        let [air, water, stone, sand, bazalt] = resolve_blocks(
            content,
            ["core:air", "base:water", "base:stone", "base:sand", "base:bazalt"],
        )?;
        Ok(Self {
            air,
            water,
            stone,
            sand,
            bazalt,
        })
    }

    fn block_at(&self, y: i32, seabed: i32) -> BlockId {
        if y <= BEDROCK_TOP {
            self.bazalt
        } else if y < seabed - Self::SAND_DEPTH {
            self.stone
        } else if y < seabed {
            self.sand
        } else if y < Self::SEA_LEVEL {
            self.water
        } else {
            self.air
        }
    }
}

impl WorldGenerator for OceanGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, seed: WorldSeed) -> GenResult<()> {
        tracing::debug!(chunk_x, chunk_z, generator = Self::KEY, "generating chunk");
        let mut rng = chunk_rng(seed, chunk_x, chunk_z);
        let shape = grid.shape();
        for z in 0..shape.depth {
            for x in 0..shape.width {
                let seabed = Self::SEA_LEVEL - rng.gen_range(Self::MIN_DEPTH..=Self::MAX_DEPTH);
                fill_column(grid, x, z, |y| self.block_at(y, seabed));
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
    fn test_every_column_is_submerged() {
        let content = content();
        let generator = OceanGenerator::new(&content).unwrap();
        let grid = generate(&generator, 10, 10, 31);
        let [water, sand] = ["base:water", "base:sand"].map(|n| id(&content, n));
        assert_valid(&content, &grid);

        for z in 0..16 {
            for x in 0..16 {
                assert_eq!(grid.column_height(x, z), Some(74));
                let floor = (0..75).rev().find(|&y| grid.get(x, y, z).map(|v| v.id) != Some(water)).unwrap();
                assert!((51..=67).contains(&(floor as i32 + 1)), "seabed at {floor}");
                assert_eq!(grid.get(x, floor, z).map(|v| v.id), Some(sand));
            }
        }
    }
}
