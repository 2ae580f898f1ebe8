//! # STRATUM
//!
//! World bootstrap for the STRATUM terrain engine: configuration, content
//! loading and generator selection.
//!
//! ## Example
//!
//! ```rust
//! use stratum::{World, WorldConfig};
//!
//! let config = WorldConfig::from_toml_str(
//!     r#"
//!     generator = "core:cubic"
//!     seed = 99
//!     "#,
//! )
//! .unwrap();
//!
//! let world = World::from_config(&config).unwrap();
//! let grid = world.generate_chunk(0, 0).unwrap();
//! let summary = world.summarize(&grid, 0, 0);
//! assert_eq!(summary.volume(), 16 * 16 * 256);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod world;

pub use config::WorldConfig;
pub use error::{ConfigError, ConfigResult};
pub use world::{ChunkSummary, World};
