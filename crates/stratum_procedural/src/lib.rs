//! # STRATUM Procedural Generation
//!
//! Deterministic chunk generation over a fixed Perlin noise field.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and chunk coordinates always produce the same voxels
//! 2. **Seamless**: Noise-driven strategies read a padded height field, so
//!    columns shared by neighbouring chunks agree
//! 3. **Resolved once**: Block names are bound to ids when a generator is built
//! 4. **Caller-owned memory**: Generators fill a grid, they never allocate one
//!
//! ## Core Components
//!
//! - `Perlin`: 3D gradient noise and fractal sums
//! - `BorderedMap`: per-chunk scalar fields with a padding border
//! - `TerrainShaper`: composite height field shared by the noise-driven strategies
//! - `WorldGenerator`: the strategy contract and its seven built-in variants
//! - `GeneratorRegistry`: string keys to generator factories
//!
//! ## Example
//!
//! ```rust
//! use stratum_core::{ChunkShape, ContentRegistry, VoxelGrid};
//! use stratum_procedural::{GeneratorRegistry, WorldSeed};
//!
//! let content = ContentRegistry::with_base_content();
//! let generator = GeneratorRegistry::with_builtin()
//!     .create_generator("core:flat", &content)
//!     .unwrap();
//!
//! let mut grid = VoxelGrid::new(ChunkShape::STANDARD);
//! generator.generate(&mut grid, 0, 0, WorldSeed::new(12345)).unwrap();
//! assert_eq!(grid.column_height(0, 0), Some(39));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod blocks;
pub mod error;
pub mod generator;
pub mod heightmap;
pub mod noise;
pub mod registry;
pub mod terrain;

pub use blocks::resolve_blocks;
pub use error::{GenResult, GenerationError};
pub use generator::{
    chunk_rng, CubicGenerator, DebrisGenerator, DefaultGenerator, FlatGenerator, OceanGenerator,
    SpaceGenerator, TropicalGenerator, WorldGenerator, PADDING,
};
pub use heightmap::{BorderedMap, MapField};
pub use noise::{Perlin, WorldSeed};
pub use registry::{GeneratorFactory, GeneratorRegistry};
pub use terrain::{ColumnFields, Sampler, TerrainOffsets, TerrainShaper, NOISE_SEA_LEVEL};
