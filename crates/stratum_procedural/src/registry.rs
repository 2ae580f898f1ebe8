//! # Generator Registry
//!
//! Maps stable string keys to generator factories. Hosts register the
//! strategies they ship once at startup, then select one per world by key.
//!
//! ```rust
//! use stratum_core::ContentRegistry;
//! use stratum_procedural::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::with_builtin();
//! let content = ContentRegistry::with_base_content();
//! let generator = registry.create_generator("core:flat", &content).unwrap();
//! assert_eq!(generator.key(), "core:flat");
//! assert!(registry.create_generator("mod:missing", &content).is_err());
//! ```

use std::collections::HashMap;

use stratum_core::ContentRegistry;

use crate::error::{GenResult, GenerationError};
use crate::generator::{
    CubicGenerator, DebrisGenerator, DefaultGenerator, FlatGenerator, OceanGenerator,
    SpaceGenerator, TropicalGenerator, WorldGenerator,
};

/// Builds a generator bound to a content registry.
pub type GeneratorFactory = fn(&ContentRegistry) -> GenResult<Box<dyn WorldGenerator>>;

/// Key to factory table.
#[derive(Default)]
pub struct GeneratorRegistry {
    factories: HashMap<String, GeneratorFactory>,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in strategy.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let builtin: [(&str, GeneratorFactory); 7] = [
            (DefaultGenerator::KEY, |c| Ok(Box::new(DefaultGenerator::new(c)?))),
            (TropicalGenerator::KEY, |c| Ok(Box::new(TropicalGenerator::new(c)?))),
            (SpaceGenerator::KEY, |c| Ok(Box::new(SpaceGenerator::new(c)?))),
            (FlatGenerator::KEY, |c| Ok(Box::new(FlatGenerator::new(c)?))),
            (CubicGenerator::KEY, |c| Ok(Box::new(CubicGenerator::new(c)?))),
            (DebrisGenerator::KEY, |c| Ok(Box::new(DebrisGenerator::new(c)?))),
            (OceanGenerator::KEY, |c| Ok(Box::new(OceanGenerator::new(c)?))),
        ];
        for (key, factory) in builtin {
            registry.factories.insert(key.to_string(), factory);
        }
        registry
    }

    /// Registers a factory under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::DuplicateGenerator`] if the key is taken.
    pub fn add_generator(&mut self, key: impl Into<String>, factory: GeneratorFactory) -> GenResult<()> {
        let key = key.into();
        if self.factories.contains_key(&key) {
            tracing::warn!(%key, "generator key registered twice");
            return Err(GenerationError::DuplicateGenerator(key));
        }
        tracing::info!(%key, "registered generator");
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Constructs the generator registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::UnknownGenerator`] for an unregistered
    /// key, or the factory's own error if block resolution fails.
    pub fn create_generator(&self, key: &str, content: &ContentRegistry) -> GenResult<Box<dyn WorldGenerator>> {
        let Some(factory) = self.factories.get(key) else {
            tracing::warn!(key, available = ?self.keys(), "unknown generator");
            return Err(GenerationError::UnknownGenerator(key.to_string()));
        };
        let generator = factory(content)?;
        tracing::info!(key, "selected generator");
        Ok(generator)
    }

    /// Returns true if `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Registered keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry").field("keys", &self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::ContentError;

    #[test]
    fn test_builtin_keys_sorted() {
        let registry = GeneratorRegistry::with_builtin();
        assert_eq!(
            registry.keys(),
            vec![
                "core:cubic",
                "core:debris",
                "core:default",
                "core:flat",
                "core:ocean",
                "core:space",
                "core:tropical",
            ]
        );
    }

    #[test]
    fn test_every_builtin_constructs() {
        let registry = GeneratorRegistry::with_builtin();
        let content = ContentRegistry::with_base_content();
        for key in registry.keys() {
            let generator = registry.create_generator(key, &content).unwrap();
            assert_eq!(generator.key(), key);
        }
    }

    #[test]
    fn test_unknown_key() {
        let registry = GeneratorRegistry::new();
        let content = ContentRegistry::with_base_content();
        assert_eq!(
            registry.create_generator("core:flat", &content).err(),
            Some(GenerationError::UnknownGenerator("core:flat".to_string()))
        );
    }

    #[test]
    fn test_duplicate_key() {
        let mut registry = GeneratorRegistry::with_builtin();
        let factory: GeneratorFactory = |c| Ok(Box::new(FlatGenerator::new(c)?));
        assert_eq!(
            registry.add_generator("core:flat", factory),
            Err(GenerationError::DuplicateGenerator("core:flat".to_string()))
        );
        registry.add_generator("mod:flat", factory).unwrap();
        assert!(registry.contains("mod:flat"));
        assert_eq!(registry.keys().len(), 8);
    }

    #[test]
    fn test_factory_error_propagates() {
        let registry = GeneratorRegistry::with_builtin();
        let content = ContentRegistry::new();
        assert_eq!(
            registry.create_generator("core:ocean", &content).err(),
            Some(GenerationError::Content(ContentError::MissingBlock("base:water".to_string())))
        );
    }
}
