//! Ruined blocky terrain: the cubic layering with a rubble palette.

use rand::Rng;
use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{chunk_rng, fill_column, WorldGenerator, BEDROCK_TOP, LOW_SEA_LEVEL};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::noise::WorldSeed;

/// Brick rubble under debris and moss, per-column random heights.
#[derive(Clone, Debug)]
pub struct DebrisGenerator {
    air: BlockId,
    water: BlockId,
    brick_debris: BlockId,
    debris: BlockId,
    moss: BlockId,
    bazalt: BlockId,
}

impl DebrisGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:debris";

    /// Highest column height.
    pub const MAX_HEIGHT: i32 = 69;

    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Fails if a required block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        let [air, water, brick_debris, debris, moss, bazalt] = resolve_blocks(
            content,
            [
                "core:air",
                "base:water",
                "base:brick_debris",
                "base:debris",
                "base:moss",
                "base:bazalt",
            ],
        )?;
        Ok(Self {
            air,
            water,
            brick_debris,
            debris,
            moss,
            bazalt,
        })
    }

    fn block_at(&self, y: i32, height: i32) -> BlockId {
        if y <= BEDROCK_TOP {
            self.bazalt
        } else if y == height && y >= LOW_SEA_LEVEL {
            self.moss
        } else if y < height - 6 {
            self.brick_debris
        } else if y < height {
            self.debris
        } else if y < LOW_SEA_LEVEL {
            self.water
        } else {
            self.air
        }
    }
}

impl WorldGenerator for DebrisGenerator {
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
