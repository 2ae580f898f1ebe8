//! # World Bootstrap
//!
//! Turns a [`WorldConfig`] into a ready generator: packs are ordered and
//! registered, then the configured strategy is built from the registry
//! with the resulting block ids.

use stratum_core::{BlockId, ChunkShape, ContentRegistry, VoxelGrid};
use stratum_procedural::{GenResult, GeneratorRegistry, WorldGenerator, WorldSeed};

use crate::config::WorldConfig;
use crate::error::ConfigResult;

/// A configured world: content, generator and seed.
pub struct World {
    content: ContentRegistry,
    generator: Box<dyn WorldGenerator>,
    seed: WorldSeed,
    shape: ChunkShape,
}

impl World {
    /// Bootstraps a world with the built-in generators.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Content`] if the packs cannot be
    /// loaded and [`crate::ConfigError::Generation`] if the generator key
    /// is unknown or its blocks are missing.
    pub fn from_config(config: &WorldConfig) -> ConfigResult<Self> {
        Self::with_registry(config, &GeneratorRegistry::with_builtin())
    }

    /// Bootstraps a world, selecting the generator from `registry`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_config`].
    pub fn with_registry(config: &WorldConfig, registry: &GeneratorRegistry) -> ConfigResult<Self> {
        let content = ContentRegistry::from_packs(&config.content_packs())?;
        let generator = registry.create_generator(&config.generator, &content)?;
        tracing::info!(
            generator = generator.key(),
            seed = config.seed,
            blocks = content.count(),
            "world ready"
        );
        Ok(Self {
            content,
            generator,
            seed: WorldSeed::new(config.seed),
            shape: config.chunk,
        })
    }

    /// Loaded content.
    #[must_use]
    pub fn content(&self) -> &ContentRegistry {
        &self.content
    }

    /// Registry key of the active generator.
    #[must_use]
    pub fn generator_key(&self) -> &'static str {
        self.generator.key()
    }

    /// World seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Chunk dimensions.
    #[must_use]
    pub const fn shape(&self) -> ChunkShape {
        self.shape
    }

    /// Generates a chunk into a fresh grid.
    ///
    /// # Errors
    ///
    /// Propagates the generator's error.
    pub fn generate_chunk(&self, chunk_x: i32, chunk_z: i32) -> GenResult<VoxelGrid> {
        let mut grid = VoxelGrid::new(self.shape);
        self.generate_into(&mut grid, chunk_x, chunk_z)?;
        Ok(grid)
    }

    /// Generates a chunk into a caller-owned grid, overwriting it.
    ///
    /// # Errors
    ///
    /// Propagates the generator's error.
    pub fn generate_into(&self, grid: &mut VoxelGrid, chunk_x: i32, chunk_z: i32) -> GenResult<()> {
        self.generator.generate(grid, chunk_x, chunk_z, self.seed)
    }

    /// Summarises a chunk generated by this world.
    #[must_use]
    pub fn summarize(&self, grid: &VoxelGrid, chunk_x: i32, chunk_z: i32) -> ChunkSummary {
        ChunkSummary::of(grid, chunk_x, chunk_z, self.content.block_id("base:water"))
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("generator", &self.generator.key())
            .field("seed", &self.seed)
            .field("shape", &self.shape)
            .field("blocks", &self.content.count())
            .finish()
    }
}

/// Cell counts and column extremes of one chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkSummary {
    /// Chunk X.
    pub chunk_x: i32,
    /// Chunk Z.
    pub chunk_z: i32,
    /// Cells that are neither air nor water.
    pub solid: usize,
    /// Air cells.
    pub air: usize,
    /// Water cells.
    pub water: usize,
    /// Lowest column top, `None` if every column is empty.
    pub min_height: Option<usize>,
    /// Highest column top.
    pub max_height: Option<usize>,
}

impl ChunkSummary {
    /// Counts the cells of `grid`. Without a water id nothing counts as water.
    #[must_use]
    pub fn of(grid: &VoxelGrid, chunk_x: i32, chunk_z: i32, water: Option<BlockId>) -> Self {
        let mut summary = Self {
            chunk_x,
            chunk_z,
            ..Self::default()
        };
        for voxel in grid.voxels() {
            if voxel.is_air() {
                summary.air += 1;
            } else if Some(voxel.id) == water {
                summary.water += 1;
            } else {
                summary.solid += 1;
            }
        }

        let shape = grid.shape();
        let tops = (0..shape.depth)
            .flat_map(|z| (0..shape.width).map(move |x| (x, z)))
            .filter_map(|(x, z)| grid.column_height(x, z));
        for top in tops {
            summary.min_height = Some(summary.min_height.map_or(top, |h| h.min(top)));
            summary.max_height = Some(summary.max_height.map_or(top, |h| h.max(top)));
        }
        summary
    }

    /// Total number of cells.
    #[must_use]
    pub const fn volume(&self) -> usize {
        self.solid + self.air + self.water
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use stratum_core::Voxel;
    use stratum_procedural::GenerationError;

    #[test]
    fn test_flat_world_summary() {
        let world = World::from_config(&WorldConfig::new("core:flat", 1)).unwrap();
        assert_eq!(world.generator_key(), "core:flat");

        let grid = world.generate_chunk(3, -4).unwrap();
        let summary = world.summarize(&grid, 3, -4);
        assert_eq!(summary.solid, 40 * 256);
        assert_eq!(summary.water, 0);
        assert_eq!(summary.volume(), ChunkShape::STANDARD.volume());
        assert_eq!((summary.min_height, summary.max_height), (Some(39), Some(39)));
    }

    #[test]
    fn test_summary_counts_water() {
        let shape = ChunkShape::new(2, 1, 4);
        let mut grid = VoxelGrid::new(shape);
        grid.set(0, 0, 0, Voxel::new(5));
        grid.set(0, 1, 0, Voxel::new(9));
        let summary = ChunkSummary::of(&grid, 0, 0, Some(9));
        assert_eq!((summary.solid, summary.water, summary.air), (1, 1, 6));
        assert_eq!((summary.min_height, summary.max_height), (Some(1), Some(1)));

        let empty = ChunkSummary::of(&VoxelGrid::new(shape), 0, 0, None);
        assert_eq!(empty.min_height, None);
    }

    #[test]
    fn test_unknown_generator() {
        let err = World::from_config(&WorldConfig::new("core:nether", 1)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Generation(GenerationError::UnknownGenerator(ref key)) if key == "core:nether"
        ));
    }

    #[test]
    fn test_custom_registry() {
        let registry = GeneratorRegistry::new();
        assert!(World::with_registry(&WorldConfig::new("core:flat", 1), &registry).is_err());
    }
}
