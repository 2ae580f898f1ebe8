//! Tropical islands: a debris crust over brick rubble, moss and grass
//! on the shore, sand on low-lying columns.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{chunk_rng, chunk_window, fill_column, surface_of, WorldGenerator, BEDROCK_TOP};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::noise::WorldSeed;
use crate::terrain::{read_column, ColumnFields, Sampler, TerrainShaper, NOISE_SEA_LEVEL};

const SEA: i32 = NOISE_SEA_LEVEL;

/// Noise-driven island terrain.
#[derive(Clone, Debug)]
pub struct TropicalGenerator {
    air: BlockId,
    water: BlockId,
    sand: BlockId,
    grass: BlockId,
    moss: BlockId,
    debris: BlockId,
    brick_debris: BlockId,
    bazalt: BlockId,
}

impl TropicalGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:tropical";

    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Fails if a required block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        let [air, water, sand, grass, moss, debris, brick_debris, bazalt] = resolve_blocks(
            content,
            [
                "core:air",
                "base:water",
                "base:sand",
                "base:grass",
                "base:moss",
                "base:debris",
                "base:brick_debris",
                "base:bazalt",
            ],
        )?;
        Ok(Self {
            air,
            water,
            sand,
            grass,
            moss,
            debris,
            brick_debris,
            bazalt,
        })
    }

    /// Returns true if the sand band covers layer `y` of a column.
    ///
    /// The band only reaches the surface for heights near 54, and a
    /// positive sand signal lifts it out of the column.
    fn in_sand_band(fields: &ColumnFields, y: f64) -> bool {
        let h = fields.height;
        let mix = fields.sand.max(fields.cliff);
        let threshold = h - (1.1 - 0.2 * (h - 54.0).powi(4)) + 10.0 * mix;
        y < h && threshold < y + (h - 0.01 - h.trunc())
    }

    fn block_at(&self, y: i32, fields: &ColumnFields, rng: &mut ChaCha8Rng) -> BlockId {
        let h = fields.height;
        let surface = surface_of(h);
        let fy = f64::from(y);

        let mut id = if y < SEA { self.water } else { self.air };
        if y == surface && y > SEA - 2 {
            id = if rng.gen_ratio(1, 8) {
                self.moss
            } else if y >= SEA {
                self.debris
            } else {
                self.water
            };
        } else if y == surface + 1 && y > SEA {
            id = if rng.gen_bool(0.5) { self.grass } else { self.air };
        } else if fy < h - 6.0 && fy > h - 30.0 {
            id = self.brick_debris;
        } else if fy < h {
            id = self.debris;
        }

        if Self::in_sand_band(fields, fy) {
            id = self.sand;
        }
        if y <= BEDROCK_TOP {
            id = self.bazalt;
        }
        id
    }
}

impl WorldGenerator for TropicalGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, seed: WorldSeed) -> GenResult<()> {
        tracing::debug!(chunk_x, chunk_z, generator = Self::KEY, "generating chunk");
        let shape = grid.shape();
        let (origin_x, origin_z, mut map) = chunk_window(shape, chunk_x, chunk_z)?;
        TerrainShaper::new(Sampler::Fractal, seed).fill_window(&mut map)?;

        let mut rng = chunk_rng(seed, chunk_x, chunk_z);
        for z in 0..shape.depth {
            for x in 0..shape.width {
                let fields = read_column(&map, origin_x + x as i32, origin_z + z as i32)?;
                fill_column(grid, x, z, |y| self.block_at(y, &fields, &mut rng));
            }
        }
        Ok(())
    }
}
