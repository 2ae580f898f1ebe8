//! # Content Registry
//!
//! Binds symbolic block names (`"base:stone"`) to runtime ids.
//!
//! `core:air` is always registered first and owns id [`BLOCK_AIR`].
//! Remaining blocks receive sequential ids in registration order, so the
//! same pack load order always yields the same id assignment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::voxel::{BlockId, BLOCK_AIR, MAX_ROTATION};

/// Name of the reserved air block.
pub const AIR_NAME: &str = "core:air";

/// Maximum number of block definitions addressable by a [`BlockId`].
pub const MAX_BLOCKS: usize = BlockId::MAX as usize + 1;

/// Integer axis vector.
pub type Axis = [i32; 3];

/// Orientation of a rotated block, as the images of the unit axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoordSystem {
    /// Image of +X.
    pub axis_x: Axis,
    /// Image of +Y.
    pub axis_y: Axis,
    /// Image of +Z.
    pub axis_z: Axis,
}

impl CoordSystem {
    /// The unrotated frame.
    pub const IDENTITY: Self = Self::new([1, 0, 0], [0, 1, 0], [0, 0, 1]);

    /// Creates a coordinate system from its axes.
    #[must_use]
    pub const fn new(axis_x: Axis, axis_y: Axis, axis_z: Axis) -> Self {
        Self { axis_x, axis_y, axis_z }
    }
}

impl Default for CoordSystem {
    fn default() -> Self {
        Self::IDENTITY
    }
}

const PIPE_VARIANTS: [CoordSystem; 6] = [
    // north
    CoordSystem::new([1, 0, 0], [0, 0, 1], [0, -1, 0]),
    // east
    CoordSystem::new([0, 0, -1], [1, 0, 0], [0, -1, 0]),
    // south
    CoordSystem::new([-1, 0, 0], [0, 0, -1], [0, -1, 0]),
    // west
    CoordSystem::new([0, 0, 1], [-1, 0, 0], [0, -1, 0]),
    // up
    CoordSystem::new([1, 0, 0], [0, 1, 0], [0, 0, 1]),
    // down
    CoordSystem::new([1, 0, 0], [0, -1, 0], [0, 0, -1]),
];

const PANE_VARIANTS: [CoordSystem; 4] = [
    // north
    CoordSystem::new([1, 0, 0], [0, 1, 0], [0, 0, 1]),
    // east
    CoordSystem::new([0, 0, -1], [0, 1, 0], [1, 0, 0]),
    // south
    CoordSystem::new([-1, 0, 0], [0, 1, 0], [0, 0, -1]),
    // west
    CoordSystem::new([0, 0, 1], [0, 1, 0], [-1, 0, 0]),
];

const _: () = assert!(PIPE_VARIANTS.len() <= MAX_ROTATION as usize + 1);

/// Set of orientations a rotatable block can take.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationProfile {
    /// Not rotatable.
    #[default]
    None,
    /// Six orientations along every axis direction (logs, pipes).
    Pipe,
    /// Four horizontal orientations (panes, doors).
    Pane,
}

impl RotationProfile {
    /// All orientations of this profile.
    #[must_use]
    pub fn variants(self) -> &'static [CoordSystem] {
        match self {
            Self::None => &[],
            Self::Pipe => &PIPE_VARIANTS,
            Self::Pane => &PANE_VARIANTS,
        }
    }

    /// Orientation for a rotation index; identity when the index is unused.
    #[must_use]
    pub fn variant(self, rotation: u8) -> CoordSystem {
        self.variants()
            .get(usize::from(rotation))
            .copied()
            .unwrap_or(CoordSystem::IDENTITY)
    }
}

/// Static definition of a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDef {
    /// Namespaced name, e.g. `base:stone`.
    pub name: String,
    /// Whether the rotation bits are meaningful for this block.
    #[serde(default)]
    pub rotatable: bool,
    /// Orientation set used when rotatable.
    #[serde(default, rename = "rotation")]
    pub rotations: RotationProfile,
    /// Whether placing another block may overwrite this one.
    #[serde(default)]
    pub replaceable: bool,
}

impl BlockDef {
    /// Creates a non-rotatable block definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rotatable: false,
            rotations: RotationProfile::None,
            replaceable: false,
        }
    }

    /// Creates a rotatable block definition.
    #[must_use]
    pub fn rotatable(name: impl Into<String>, rotations: RotationProfile) -> Self {
        Self {
            name: name.into(),
            rotatable: rotations != RotationProfile::None,
            rotations,
            replaceable: false,
        }
    }

    /// Sets whether placement may overwrite the block.
    #[must_use]
    pub fn with_replaceable(mut self, replaceable: bool) -> Self {
        self.replaceable = replaceable;
        self
    }

    /// Orientation encoded by a rotation index.
    ///
    /// Non-rotatable blocks always report the identity frame.
    #[must_use]
    pub fn orientation(&self, rotation: u8) -> CoordSystem {
        if self.rotatable {
            self.rotations.variant(rotation)
        } else {
            CoordSystem::IDENTITY
        }
    }
}

/// Name-to-id table of all loaded block definitions.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    /// Definitions indexed by id.
    blocks: Vec<BlockDef>,
    /// Name lookup.
    name_to_id: HashMap<String, BlockId>,
}

impl ContentRegistry {
    /// Creates a registry holding only `core:air`.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            blocks: Vec::new(),
            name_to_id: HashMap::new(),
        };
        registry.insert(BlockDef::new(AIR_NAME).with_replaceable(true));
        registry
    }

    /// Creates a registry holding `core:air` and the stock `base` pack.
    #[must_use]
    pub fn with_base_content() -> Self {
        let mut registry = Self::new();
        for def in crate::packs::base_blocks() {
            registry.insert(def);
        }
        registry
    }

    /// Appends a definition whose name is known to be unique.
    fn insert(&mut self, def: BlockDef) -> BlockId {
        let id = self.blocks.len() as BlockId;
        self.name_to_id.insert(def.name.clone(), id);
        self.blocks.push(def);
        id
    }

    /// Registers a block definition.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::DuplicateBlock`] if the name is taken and
    /// [`ContentError::TooManyBlocks`] if the id space is exhausted.
    pub fn register(&mut self, def: BlockDef) -> ContentResult<BlockId> {
        if self.name_to_id.contains_key(&def.name) {
            tracing::warn!(block = %def.name, "block registered twice");
            return Err(ContentError::DuplicateBlock(def.name));
        }
        if self.blocks.len() >= MAX_BLOCKS {
            tracing::warn!(block = %def.name, limit = MAX_BLOCKS, "block id space exhausted");
            return Err(ContentError::TooManyBlocks { limit: MAX_BLOCKS });
        }
        Ok(self.insert(def))
    }

    /// Resolves a block name to its runtime id.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingBlock`] if the name is unknown.
    pub fn require_block(&self, name: &str) -> ContentResult<BlockId> {
        self.block_id(name)
            .ok_or_else(|| ContentError::MissingBlock(name.to_string()))
    }

    /// Looks up a block id by name.
    #[must_use]
    pub fn block_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Gets a block definition by id.
    #[must_use]
    pub fn block_def(&self, id: BlockId) -> Option<&BlockDef> {
        self.blocks.get(usize::from(id))
    }

    /// Returns true if `id` refers to a registered block.
    #[must_use]
    pub fn contains_id(&self, id: BlockId) -> bool {
        usize::from(id) < self.blocks.len()
    }

    /// Number of registered block definitions, air included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    /// All definitions in id order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &BlockDef)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(id, def)| (id as BlockId, def))
    }

    /// Id of `core:air`.
    #[must_use]
    pub const fn air(&self) -> BlockId {
        BLOCK_AIR
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
