//! # World Configuration
//!
//! Loaded once at startup from TOML.
//!
//! ```toml
//! generator = "core:default"
//! seed = 12345
//! # Extra pack manifests, relative to this file
//! pack_files = ["packs/ruins.toml"]
//!
//! # Optional, defaults to 16 x 16 x 256
//! [chunk]
//! width = 16
//! depth = 16
//! height = 256
//!
//! [[packs]]
//! id = "metal"
//! dependencies = ["base"]
//! blocks = [{ name = "metal:plate" }]
//! ```
//!
//! The built-in `base` pack is always present unless a pack with id
//! `base` replaces it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stratum_core::{ChunkShape, ContentPack, BASE_PACK};

use crate::error::{ConfigError, ConfigResult};

/// Settings of one world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    /// Registry key of the generator, e.g. `core:default`.
    pub generator: String,
    /// World seed.
    pub seed: u64,
    /// Chunk dimensions.
    #[serde(default)]
    pub chunk: ChunkShape,
    /// Pack manifests to read, relative to the config file.
    #[serde(default)]
    pub pack_files: Vec<PathBuf>,
    /// Inline content packs.
    #[serde(default)]
    pub packs: Vec<ContentPack>,
}

impl WorldConfig {
    /// Creates a config with the standard chunk shape and base content.
    #[must_use]
    pub fn new(generator: impl Into<String>, seed: u64) -> Self {
        Self {
            generator: generator.into(),
            seed,
            chunk: ChunkShape::STANDARD,
            pack_files: Vec::new(),
            packs: Vec::new(),
        }
    }

    /// Parses a config from TOML. `pack_files` are left unread.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// and [`ConfigError::Invalid`] for an empty or oversized chunk shape.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source).map_err(|err| {
            tracing::warn!(error = %err.message(), "world config does not parse");
            err
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file and the pack manifests it names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if a file cannot be read, plus any
    /// error of [`Self::from_toml_str`] or [`ContentPack::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&read(path)?)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for file in &config.pack_files {
            let manifest = base_dir.join(file);
            let pack = ContentPack::from_toml_str(&read(&manifest)?)?;
            tracing::debug!(pack = %pack.id, path = %manifest.display(), "read pack manifest");
            config.packs.push(pack);
        }
        tracing::info!(path = %path.display(), generator = %config.generator, seed = config.seed, "loaded world config");
        Ok(config)
    }

    /// Packs to load, with the built-in base pack unless overridden.
    #[must_use]
    pub fn content_packs(&self) -> Vec<ContentPack> {
        let mut packs = Vec::with_capacity(self.packs.len() + 1);
        if !self.packs.iter().any(|p| p.id == BASE_PACK) {
            packs.push(ContentPack::base());
        }
        packs.extend(self.packs.iter().cloned());
        packs
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.chunk.volume() == 0 {
            tracing::warn!(chunk = ?self.chunk, "chunk shape has no volume");
            return Err(ConfigError::Invalid(format!(
                "chunk shape {}x{}x{} is empty",
                self.chunk.width, self.chunk.depth, self.chunk.height
            )));
        }
        if i32::try_from(self.chunk.height).is_err() {
            tracing::warn!(height = self.chunk.height, "chunk height does not fit block coordinates");
            return Err(ConfigError::Invalid(format!("chunk height {} is too large", self.chunk.height)));
        }
        Ok(())
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        tracing::warn!(path = %path.display(), %source, "cannot read config file");
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
