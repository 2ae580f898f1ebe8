//! # Block Access
//!
//! Runtime read/write access to a generated chunk, in the shape gameplay
//! scripts expect: signed coordinates, sentinel values instead of errors
//! for positions outside the chunk, and ids validated against the content
//! registry before they are written.

use crate::content::{Axis, ContentRegistry, CoordSystem};
use crate::error::{ContentResult, EncodingResult};
use crate::grid::VoxelGrid;
use crate::voxel::{decode_user_bits, user_bits_mask, BlockId, Voxel};

/// Value reported by [`BlockAccess::get`] for positions outside the chunk.
pub const NO_VOXEL: i32 = -1;

/// Mutable view of one chunk bound to its content registry.
pub struct BlockAccess<'a> {
    content: &'a ContentRegistry,
    grid: &'a mut VoxelGrid,
}

impl<'a> BlockAccess<'a> {
    /// Binds a grid to the registry its ids come from.
    pub fn new(content: &'a ContentRegistry, grid: &'a mut VoxelGrid) -> Self {
        Self { content, grid }
    }

    fn voxel(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        let index = self.grid.shape().signed_index(x, y, z)?;
        Some(self.grid.voxels()[index])
    }

    fn voxel_mut(&mut self, x: i32, y: i32, z: i32) -> Option<&mut Voxel> {
        let index = self.grid.shape().signed_index(x, y, z)?;
        Some(&mut self.grid.voxels_mut()[index])
    }

    /// Runtime id of a block name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ContentError::MissingBlock`] for unknown names.
    pub fn index(&self, name: &str) -> ContentResult<BlockId> {
        self.content.require_block(name)
    }

    /// Name of a block id, or `None` if the id is not registered.
    #[must_use]
    pub fn name(&self, id: i64) -> Option<&str> {
        let id = BlockId::try_from(id).ok()?;
        self.content.block_def(id).map(|def| def.name.as_str())
    }

    /// Number of registered block definitions.
    #[must_use]
    pub fn defs_count(&self) -> usize {
        self.content.count()
    }

    /// Block id at a position, or [`NO_VOXEL`].
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> i32 {
        self.voxel(x, y, z).map_or(NO_VOXEL, |v| i32::from(v.id))
    }

    /// Writes a block id and state word.
    ///
    /// Unknown ids and positions outside the chunk are ignored. Returns
    /// whether anything was written.
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: i64, states: u16) -> bool {
        let Ok(id) = BlockId::try_from(id) else {
            return false;
        };
        if !self.content.contains_id(id) {
            return false;
        }
        match self.voxel_mut(x, y, z) {
            Some(slot) => {
                *slot = Voxel::with_states(id, states);
                true
            }
            None => false,
        }
    }

    /// Raw state word, `0` outside the chunk.
    #[must_use]
    pub fn states(&self, x: i32, y: i32, z: i32) -> u16 {
        self.voxel(x, y, z).map_or(0, |v| v.states)
    }

    /// Overwrites the raw state word.
    pub fn set_states(&mut self, x: i32, y: i32, z: i32, states: u16) {
        if let Some(voxel) = self.voxel_mut(x, y, z) {
            voxel.states = states;
        }
    }

    /// Rotation index, `0` outside the chunk.
    #[must_use]
    pub fn rotation(&self, x: i32, y: i32, z: i32) -> u8 {
        self.voxel(x, y, z).map_or(0, Voxel::rotation)
    }

    /// Sets the rotation index. Positions outside the chunk are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EncodingError::RotationOutOfRange`] if the index
    /// does not fit the rotation field.
    pub fn set_rotation(&mut self, x: i32, y: i32, z: i32, rotation: u8) -> EncodingResult<()> {
        match self.voxel_mut(x, y, z) {
            Some(voxel) => voxel.set_rotation(rotation),
            None => Ok(()),
        }
    }

    /// Reads a user sub-field, `0` outside the chunk.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EncodingError::UserBitsOutOfRange`] for an invalid
    /// sub-field, whether or not the position is inside the chunk.
    pub fn user_bits(&self, x: i32, y: i32, z: i32, offset: u32, width: u32) -> EncodingResult<u32> {
        let states = self.states(x, y, z);
        decode_user_bits(states, offset, width)
    }

    /// Writes a user sub-field. Positions outside the chunk are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EncodingError::UserBitsOutOfRange`] for an invalid
    /// sub-field.
    pub fn set_user_bits(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        offset: u32,
        width: u32,
        value: u32,
    ) -> EncodingResult<()> {
        // Invalid fields are errors even outside the chunk.
        user_bits_mask(offset, width)?;
        if let Some(voxel) = self.voxel_mut(x, y, z) {
            voxel.set_user_bits(value, offset, width)?;
        }
        Ok(())
    }

    /// Orientation of the voxel at a position.
    ///
    /// Identity outside the chunk and for blocks that are not rotatable.
    #[must_use]
    pub fn orientation(&self, x: i32, y: i32, z: i32) -> CoordSystem {
        self.voxel(x, y, z)
            .and_then(|v| {
                self.content
                    .block_def(v.id)
                    .map(|def| def.orientation(v.rotation()))
            })
            .unwrap_or(CoordSystem::IDENTITY)
    }

    /// Image of the block's +X axis.
    #[must_use]
    pub fn axis_x(&self, x: i32, y: i32, z: i32) -> Axis {
        self.orientation(x, y, z).axis_x
    }

    /// Image of the block's +Y axis.
    #[must_use]
    pub fn axis_y(&self, x: i32, y: i32, z: i32) -> Axis {
        self.orientation(x, y, z).axis_y
    }

    /// Image of the block's +Z axis.
    #[must_use]
    pub fn axis_z(&self, x: i32, y: i32, z: i32) -> Axis {
        self.orientation(x, y, z).axis_z
    }

    /// Returns true if a non-air block occupies the position.
    #[must_use]
    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.voxel(x, y, z).is_some_and(|v| !v.is_air())
    }

    /// Returns true if the block at the position may be overwritten.
    ///
    /// False outside the chunk.
    #[must_use]
    pub fn is_replaceable_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.voxel(x, y, z)
            .and_then(|v| self.content.block_def(v.id))
            .is_some_and(|def| def.replaceable)
    }
}
