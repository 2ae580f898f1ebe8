//! Floating terrain with a mirrored underside.
//!
//! Above sea level the island surface follows the tropical rules. Below
//! it the same height field is reflected about sea level, hanging a
//! debris keel under tall islands. There is no water and no bedrock.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use stratum_core::{BlockId, ContentRegistry, VoxelGrid};

use super::{chunk_rng, chunk_window, fill_column, surface_of, WorldGenerator};
use crate::blocks::resolve_blocks;
use crate::error::GenResult;
use crate::heightmap::MapField;
use crate::noise::WorldSeed;
use crate::terrain::{Sampler, TerrainShaper, NOISE_SEA_LEVEL};

const SEA: i32 = NOISE_SEA_LEVEL;

/// Noise-driven floating islands.
#[derive(Clone, Debug)]
pub struct SpaceGenerator {
    air: BlockId,
    grass: BlockId,
    moss: BlockId,
    debris: BlockId,
    brick_debris: BlockId,
}

impl SpaceGenerator {
    /// Registry key.
    pub const KEY: &'static str = "core:space";

    /// Islands sit this far below the raw height field.
    pub const SINK: f64 = 7.0;

    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Fails if a required block is not registered.
    pub fn new(content: &ContentRegistry) -> GenResult<Self> {
        let [air, grass, moss, debris, brick_debris] = resolve_blocks(
            content,
            ["core:air", "base:grass", "base:moss", "base:debris", "base:brick_debris"],
        )?;
        Ok(Self {
            air,
            grass,
            moss,
            debris,
            brick_debris,
        })
    }

    fn block_at(&self, y: i32, height: f64, rng: &mut ChaCha8Rng) -> BlockId {
        let fy = f64::from(y);

        if y < SEA {
            let mirrored = f64::from(SEA - y);
            return if mirrored < height - f64::from(SEA) {
                self.debris
            } else {
                self.air
            };
        }

        let surface = surface_of(height);
        if y == surface {
            // A surface exactly at sea level is moss or nothing.
            if rng.gen_ratio(1, 8) {
                self.moss
            } else if y > SEA {
                self.debris
            } else {
                self.air
            }
        } else if y == surface + 1 && y > SEA {
            if rng.gen_bool(0.5) {
                self.grass
            } else {
                self.air
            }
        } else if fy < height - 6.0 && fy > height - 30.0 {
            self.brick_debris
        } else if fy < height {
            self.debris
        } else {
            self.air
        }
    }
}

impl WorldGenerator for SpaceGenerator {
    fn key(&self) -> &'static str {
        Self::KEY
    }

    fn generate(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32, seed: WorldSeed) -> GenResult<()> {
        tracing::debug!(chunk_x, chunk_z, generator = Self::KEY, "generating chunk");
        let shape = grid.shape();
        let (origin_x, origin_z, mut map) = chunk_window(shape, chunk_x, chunk_z)?;
        TerrainShaper::new(Sampler::Single, seed).fill_window(&mut map)?;

        let mut rng = chunk_rng(seed, chunk_x, chunk_z);
        for z in 0..shape.depth {
            for x in 0..shape.width {
                let height = map.get(MapField::Height, origin_x + x as i32, origin_z + z as i32)? - Self::SINK;
                fill_column(grid, x, z, |y| self.block_at(y, height, &mut rng));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::generator::test_support::{assert_valid, content, generate, id};

    #[test]
    fn test_mirrored_underside() {
        let content = content();
        let generator = SpaceGenerator::new(&content).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let debris = id(&content, "base:debris");
        let brick = id(&content, "base:brick_debris");

        // Surface at 90: the keel reaches 15 layers below sea level.
        let height = 90.5;
        assert_eq!(generator.block_at(74, height, &mut rng), debris);
        assert_eq!(generator.block_at(60, height, &mut rng), debris);
        assert_eq!(generator.block_at(59, height, &mut rng), 0);
        assert_eq!(generator.block_at(3, height, &mut rng), 0);
        assert_eq!(generator.block_at(80, height, &mut rng), brick);
        assert_eq!(generator.block_at(120, height, &mut rng), 0);

        // Low islands have no underside.
        assert_eq!(generator.block_at(74, 70.0, &mut rng), 0);
    }

    #[test]
    fn test_surface_at_sea_level() {
        let content = content();
        let generator = SpaceGenerator::new(&content).unwrap();
        let [moss, debris] = ["base:moss", "base:debris"].map(|n| id(&content, n));
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let level: Vec<BlockId> = (0..64)
            .map(|_| generator.block_at(SEA, f64::from(SEA) + 0.5, &mut rng))
            .collect();
        assert!(level.iter().all(|&b| b == moss || b == 0));
        assert!(level.contains(&0));

        let above: Vec<BlockId> = (0..64)
            .map(|_| generator.block_at(SEA + 1, f64::from(SEA) + 1.5, &mut rng))
            .collect();
        assert!(above.iter().all(|&b| b == moss || b == debris));
        assert!(above.contains(&debris));
    }

    #[test]
    fn test_generated_chunk() {
        let content = content();
        let generator = SpaceGenerator::new(&content).unwrap();
        let grid = generate(&generator, -2, 5, 9);
        assert_valid(&content, &grid);

        assert_eq!(grid.count(id(&content, "base:water")), 0);
        assert_eq!(grid.count(id(&content, "base:bazalt")), 0);
        let debris = id(&content, "base:debris");
        for z in 0..16 {
            for x in 0..16 {
                for y in 0..SEA as usize {
                    let voxel = grid.get(x, y, z).unwrap();
                    assert!(voxel.is_air() || voxel.id == debris);
                }
            }
        }
        assert_eq!(grid, generate(&generator, -2, 5, 9));
    }
}
