//! # Content Packs
//!
//! Packs declare blocks and the packs they depend on. Before registration
//! the pack set is ordered so every pack loads after its dependencies.
//!
//! Ordering is Kahn's algorithm over the dependency graph. A pack that
//! names an absent dependency is rejected, and so is a dependency cycle
//! among present packs; the cycle is reported with its member ids.
//!
//! ## Manifest Format
//!
//! ```toml
//! id = "ruins"
//! dependencies = ["base"]
//!
//! [[blocks]]
//! name = "ruins:pillar"
//! rotatable = true
//! rotation = "pipe"
//! ```

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::content::{BlockDef, ContentRegistry, RotationProfile};
use crate::error::{ContentError, ContentResult};

/// Id of the stock content pack.
pub const BASE_PACK: &str = "base";

/// Block names of the stock content pack, in registration order.
pub const BASE_BLOCK_NAMES: [&str; 15] = [
    "base:stone",
    "base:dirt",
    "base:grass_block",
    "base:sand",
    "base:water",
    "base:wood",
    "base:leaves",
    "base:grass",
    "base:flower",
    "base:bazalt",
    "base:debris",
    "base:moss",
    "base:brick",
    "base:brick_debris",
    "base:rust",
];

/// Definitions of the stock content pack.
#[must_use]
pub fn base_blocks() -> Vec<BlockDef> {
    BASE_BLOCK_NAMES
        .iter()
        .map(|&name| match name {
            "base:wood" => BlockDef::rotatable(name, RotationProfile::Pipe),
            "base:water" | "base:grass" | "base:flower" => BlockDef::new(name).with_replaceable(true),
            _ => BlockDef::new(name),
        })
        .collect()
}

/// A content pack manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPack {
    /// Pack id.
    pub id: String,
    /// Ids of packs that must load first.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Blocks contributed by this pack.
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

impl ContentPack {
    /// Creates an empty pack.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dependencies: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// The stock `base` pack.
    #[must_use]
    pub fn base() -> Self {
        Self {
            id: BASE_PACK.to_string(),
            dependencies: Vec::new(),
            blocks: base_blocks(),
        }
    }

    /// Adds a dependency.
    #[must_use]
    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Adds a block.
    #[must_use]
    pub fn with_block(mut self, def: BlockDef) -> Self {
        self.blocks.push(def);
        self
    }

    /// Parses a pack manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidManifest`] if the TOML is malformed.
    pub fn from_toml_str(source: &str) -> ContentResult<Self> {
        toml::from_str(source).map_err(|e| {
            tracing::warn!(error = %e.message(), "content pack manifest does not parse");
            ContentError::InvalidManifest(e.to_string())
        })
    }
}

/// Orders packs so that each one follows all of its dependencies.
///
/// Packs with no ordering constraint between them are sorted by id, so the
/// result does not depend on input order.
///
/// # Errors
///
/// - [`ContentError::DuplicatePack`] if two packs share an id.
/// - [`ContentError::MissingDependency`] if a dependency is absent.
/// - [`ContentError::DependencyCycle`] if dependencies form a cycle.
pub fn resolve_load_order(packs: &[ContentPack]) -> ContentResult<Vec<&ContentPack>> {
    let mut by_id: BTreeMap<&str, &ContentPack> = BTreeMap::new();
    for pack in packs {
        if by_id.insert(pack.id.as_str(), pack).is_some() {
            tracing::warn!(pack = %pack.id, "content pack listed twice");
            return Err(ContentError::DuplicatePack(pack.id.clone()));
        }
    }

    // Edge dependency -> dependent
    let mut in_degree: BTreeMap<&str, usize> = by_id.keys().map(|&id| (id, 0)).collect();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for pack in by_id.values() {
        let unique: BTreeSet<&str> = pack.dependencies.iter().map(String::as_str).collect();
        for dependency in unique {
            if !by_id.contains_key(dependency) {
                tracing::warn!(pack = %pack.id, dependency, "content pack dependency is missing");
                return Err(ContentError::MissingDependency {
                    pack: pack.id.clone(),
                    dependency: dependency.to_string(),
                });
            }
            dependents.entry(dependency).or_default().push(pack.id.as_str());
            *in_degree.entry(pack.id.as_str()).or_insert(0) += 1;
        }
    }

    // Kahn's algorithm; the ready set is ordered so ties break by id.
    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(by_id.len());

    while let Some(id) = ready.pop_first() {
        order.push(by_id[id]);
        for &dependent in dependents.get(id).map(Vec::as_slice).unwrap_or_default() {
            if let Some(deg) = in_degree.get_mut(dependent) {
                *deg -= 1;
                if *deg == 0 {
                    ready.insert(dependent);
                }
            }
        }
    }

    if order.len() != by_id.len() {
        let cycle = find_cycle(&by_id).unwrap_or_default();
        tracing::warn!(?cycle, "content pack dependencies form a cycle");
        return Err(ContentError::DependencyCycle(cycle));
    }

    Ok(order)
}

/// Extracts one dependency cycle, closed with its first pack repeated.
fn find_cycle(by_id: &BTreeMap<&str, &ContentPack>) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut on_path = HashSet::new();
    let mut path = Vec::new();

    for &start in by_id.keys() {
        if !visited.contains(start) {
            if let Some(cycle) = dfs_find_cycle(start, by_id, &mut visited, &mut on_path, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs_find_cycle<'a>(
    id: &'a str,
    by_id: &BTreeMap<&'a str, &'a ContentPack>,
    visited: &mut HashSet<&'a str>,
    on_path: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(id);
    on_path.insert(id);
    path.push(id);

    if let Some(pack) = by_id.get(id) {
        for dependency in &pack.dependencies {
            let Some((&next, _)) = by_id.get_key_value(dependency.as_str()) else {
                continue;
            };
            if on_path.contains(next) {
                let start = path.iter().position(|&p| p == next).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|s| (*s).to_string()).collect();
                cycle.push(next.to_string());
                return Some(cycle);
            }
            if !visited.contains(next) {
                if let Some(cycle) = dfs_find_cycle(next, by_id, visited, on_path, path) {
                    return Some(cycle);
                }
            }
        }
    }

    path.pop();
    on_path.remove(id);
    None
}

impl ContentRegistry {
    /// Builds a registry from content packs in dependency order.
    ///
    /// # Errors
    ///
    /// Propagates ordering errors from [`resolve_load_order`] and
    /// registration errors such as [`ContentError::DuplicateBlock`].
    pub fn from_packs(packs: &[ContentPack]) -> ContentResult<Self> {
        let mut registry = Self::new();
        for pack in resolve_load_order(packs)? {
            tracing::debug!(pack = %pack.id, blocks = pack.blocks.len(), "loading content pack");
            for def in &pack.blocks {
                registry.register(def.clone())?;
            }
        }
        tracing::info!(packs = packs.len(), blocks = registry.count(), "content loaded");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(order: &[&ContentPack]) -> Vec<String> {
        order.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_dependencies_load_first() {
        let packs = vec![
            ContentPack::new("ruins").depends_on("base").depends_on("metal"),
            ContentPack::new("metal").depends_on("base"),
            ContentPack::base(),
        ];
        let order = resolve_load_order(&packs).unwrap();
        assert_eq!(ids(&order), ["base", "metal", "ruins"]);
    }

    #[test]
    fn test_independent_packs_sorted_by_id() {
        let packs = vec![ContentPack::new("zeta"), ContentPack::new("alpha"), ContentPack::new("mid")];
        let order = resolve_load_order(&packs).unwrap();
        assert_eq!(ids(&order), ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_missing_dependency() {
        let packs = vec![ContentPack::new("ruins").depends_on("base")];
        assert_eq!(
            resolve_load_order(&packs).unwrap_err(),
            ContentError::MissingDependency {
                pack: "ruins".to_string(),
                dependency: "base".to_string(),
            }
        );
    }

    #[test]
    fn test_cycle_detected() {
        let packs = vec![
            ContentPack::base(),
            ContentPack::new("a").depends_on("c").depends_on("base"),
            ContentPack::new("b").depends_on("a"),
            ContentPack::new("c").depends_on("b"),
        ];
        let ContentError::DependencyCycle(cycle) = resolve_load_order(&packs).unwrap_err() else {
            panic!("expected a dependency cycle");
        };
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
        for id in ["a", "b", "c"] {
            assert!(cycle.iter().any(|c| c == id), "cycle {cycle:?} misses {id}");
        }
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let packs = vec![ContentPack::new("loop").depends_on("loop")];
        assert_eq!(
            resolve_load_order(&packs).unwrap_err(),
            ContentError::DependencyCycle(vec!["loop".to_string(), "loop".to_string()])
        );
    }

    #[test]
    fn test_duplicate_pack() {
        let packs = vec![ContentPack::base(), ContentPack::base()];
        assert_eq!(
            resolve_load_order(&packs).unwrap_err(),
            ContentError::DuplicatePack(BASE_PACK.to_string())
        );
    }

    #[test]
    fn test_registry_from_packs_matches_base_content() {
        let from_packs = ContentRegistry::from_packs(&[ContentPack::base()]).unwrap();
        let builtin = ContentRegistry::with_base_content();
        assert_eq!(from_packs.count(), builtin.count());
        for name in BASE_BLOCK_NAMES {
            assert_eq!(from_packs.block_id(name), builtin.block_id(name));
        }
    }

    #[test]
    fn test_manifest_parsing() {
        let pack = ContentPack::from_toml_str(
            r#"
            id = "ruins"
            dependencies = ["base"]

            [[blocks]]
            name = "ruins:pillar"
            rotatable = true
            rotation = "pipe"

            [[blocks]]
            name = "ruins:rubble"
            replaceable = true
            "#,
        )
        .unwrap();

        assert_eq!(pack.dependencies, ["base"]);
        assert_eq!(pack.blocks[0], BlockDef::rotatable("ruins:pillar", RotationProfile::Pipe));
        assert_eq!(pack.blocks[1], BlockDef::new("ruins:rubble").with_replaceable(true));

        let registry = ContentRegistry::from_packs(&[ContentPack::base(), pack]).unwrap();
        assert_eq!(registry.block_id("ruins:pillar"), Some(BASE_BLOCK_NAMES.len() as u16 + 1));
    }

    #[test]
    fn test_bad_manifest() {
        let err = ContentPack::from_toml_str("id = 5").unwrap_err();
        assert!(matches!(err, ContentError::InvalidManifest(_)));
    }
}
