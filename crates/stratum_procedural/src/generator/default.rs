//! The stock overworld: grassland over dirt and stone, sandy beaches,
//! bare stone on steep slopes.
//!
//! Slope is the largest height difference to the four neighbouring
//! columns. Edge columns read their neighbours from the padded window,
//! so slopes agree across chunk borders.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{chunk_rng, chunk_window, fill_column, surface_of, WorldGenerator, BEDROCK_TOP};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::heightmap::{BorderedMap, MapField};
use crate::noise::WorldSeed;
use crate::terrain::{Sampler, TerrainShaper};

/// Noise-driven grassland terrain.
#[derive(Clone, Debug)]
pub struct DefaultGenerator {
    air: BlockId,
    water: BlockId,
    stone: BlockId,
    dirt: BlockId,
    grass_block: BlockId,
    sand: BlockId,
    grass: BlockId,
    flower: BlockId,
    bazalt: BlockId,
}

/// Surface decision for one column.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Column {
    height: f64,
    top: BlockId,
    decoration: BlockId,
}

impl DefaultGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:default";

    /// Sea level.
    pub const SEA_LEVEL: i32 = 64;

    /// Slope above which the surface is bare stone.
    pub const STEEP_SLOPE: f64 = 4.0;

    /// Beaches reach this many layers above sea level.
    pub const BEACH_HEIGHT: i32 = 1;

    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Fails if a required block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        let [air, water, stone, dirt, grass_block, sand, grass, flower, bazalt] = resolve_blocks(
            content,
            [
                "core:air",
                "base:water",
                "base:stone",
                "base:dirt",
                "base:grass_block",
                "base:sand",
                "base:grass",
                "base:flower",
                "base:bazalt",
            ],
        )?;
        Ok(Self {
            air,
            water,
            stone,
            dirt,
            grass_block,
            sand,
            grass,
            flower,
            bazalt,
        })
    }

    /// Largest absolute height step from `(x, z)` to its four neighbours.
    fn slope(map: &BorderedMap, x: i32, z: i32) -> GenResult<f64> {
        let height = map.get(MapField::Height, x, z)?;
        let mut slope: f64 = 0.0;
        for (dx, dz) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let neighbour = map.get(MapField::Height, x + dx, z + dz)?;
            slope = slope.max((neighbour - height).abs());
        }
        Ok(slope)
    }

    fn plan_column(&self, height: f64, slope: f64, rng: &mut ChaCha8Rng) -> Column {
        let surface = surface_of(height);
        let top = if slope >= Self::STEEP_SLOPE {
            self.stone
        } else if surface <= Self::SEA_LEVEL + Self::BEACH_HEIGHT {
            self.sand
        } else {
            self.grass_block
        };

        let decoration = if top != self.grass_block {
            self.air
        } else if rng.gen_ratio(1, 16) {
            self.flower
        } else if rng.gen_ratio(1, 3) {
            self.grass
        } else {
            self.air
        };

        Column {
            height,
            top,
            decoration,
        }
    }

    fn block_at(&self, y: i32, column: &Column) -> BlockId {
        let surface = surface_of(column.height);
        if y <= BEDROCK_TOP {
            self.bazalt
        } else if f64::from(y) < column.height - 6.0 {
            self.stone
        } else if y < surface {
            if column.top == self.sand {
                self.sand
            } else {
                self.dirt
            }
        } else if y == surface {
            column.top
        } else if y < Self::SEA_LEVEL {
            self.water
        } else if y == surface + 1 {
            column.decoration
        } else {
            self.air
        }
    }
}

impl WorldGenerator for DefaultGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, seed: WorldSeed) -> GenResult<()> {
        tracing::debug!(chunk_x, chunk_z, generator = Self::KEY, "generating chunk");
        let shape = grid.shape();
        let (origin_x, origin_z, mut map) = chunk_window(shape, chunk_x, chunk_z)?;
        TerrainShaper::new(Sampler::Fractal, seed)
            .with_sea_level(Self::SEA_LEVEL)
            .fill_window(&mut map)?;

        let mut rng = chunk_rng(seed, chunk_x, chunk_z);
        for z in 0..shape.depth {
            for x in 0..shape.width {
                let (wx, wz) = (origin_x + x as i32, origin_z + z as i32);
                let height = map.get(MapField::Height, wx, wz)?;
                let column = self.plan_column(height, Self::slope(&map, wx, wz)?, &mut rng);
                fill_column(grid, x, z, |y| self.block_at(y, &column));
            }
        }
        Ok(())
    }
}
