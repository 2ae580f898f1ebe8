//! # Voxel Encoding
//!
//! A voxel is a block id plus a 16-bit state word.
//!
//! ## State Layout
//!
//! ```text
//! bit  15 ............ 8 7 ...... 3 2 .. 0
//!      |  user bits (8) | reserved  | rot |
//! ```
//!
//! - **rotation**: index into the block's rotation profile. Ignored for
//!   blocks that are not rotatable.
//! - **reserved**: engine-owned, never touched by user accessors.
//! - **user bits**: subdivided by callers into sub-fields. Offsets passed to
//!   the user accessors are relative to [`USER_BITS_OFFSET`].
//!
//! Every setter rewrites only its own range; all other bits are preserved.

use bytemuck::{Pod, Zeroable};

use crate::error::{EncodingError, EncodingResult};

/// Runtime block identifier.
pub type BlockId = u16;

/// Id reserved for `core:air`.
pub const BLOCK_AIR: BlockId = 0;

/// Width of the rotation field.
pub const ROTATION_BITS: u32 = 3;

/// Mask of the rotation field.
pub const ROTATION_MASK: u16 = 0b0000_0000_0000_0111;

/// Largest encodable rotation index.
pub const MAX_ROTATION: u8 = ROTATION_MASK as u8;

/// Mask of the engine-reserved bits.
pub const RESERVED_MASK: u16 = 0b0000_0000_1111_1000;

/// First bit of the user region.
pub const USER_BITS_OFFSET: u32 = 8;

/// Width of the user region.
pub const USER_BITS_WIDTH: u32 = 8;

/// Mask of the user region.
pub const USER_BITS_MASK: u16 = 0b1111_1111_0000_0000;

const _: () = {
    assert!(ROTATION_MASK & RESERVED_MASK == 0);
    assert!(ROTATION_MASK & USER_BITS_MASK == 0);
    assert!(RESERVED_MASK & USER_BITS_MASK == 0);
    assert!(ROTATION_MASK | RESERVED_MASK | USER_BITS_MASK == u16::MAX);
    assert!(USER_BITS_OFFSET + USER_BITS_WIDTH == u16::BITS);
};

/// Writes `rotation` into the rotation field of `states`.
///
/// # Errors
///
/// Returns [`EncodingError::RotationOutOfRange`] if `rotation` exceeds
/// [`MAX_ROTATION`].
#[inline]
pub fn encode_rotation(states: u16, rotation: u8) -> EncodingResult<u16> {
    if rotation > MAX_ROTATION {
        return Err(EncodingError::RotationOutOfRange(rotation));
    }
    Ok((states & !ROTATION_MASK) | u16::from(rotation))
}

/// Reads the rotation field of `states`.
#[inline]
#[must_use]
pub const fn decode_rotation(states: u16) -> u8 {
    (states & ROTATION_MASK) as u8
}

/// Computes the absolute mask of a user sub-field.
///
/// # Errors
///
/// Returns [`EncodingError::UserBitsOutOfRange`] if the sub-field is empty
/// or leaves the user region.
#[inline]
pub fn user_bits_mask(offset: u32, width: u32) -> EncodingResult<u16> {
    if width == 0 || offset.saturating_add(width) > USER_BITS_WIDTH {
        return Err(EncodingError::UserBitsOutOfRange { offset, width });
    }
    Ok((((1u32 << width) - 1) << (USER_BITS_OFFSET + offset)) as u16)
}

/// Writes `value` into a user sub-field of `states`.
///
/// Bits of `value` above `width` are discarded.
///
/// # Errors
///
/// Returns [`EncodingError::UserBitsOutOfRange`] for an invalid sub-field.
#[inline]
pub fn encode_user_bits(states: u16, value: u32, offset: u32, width: u32) -> EncodingResult<u16> {
    let mask = user_bits_mask(offset, width)?;
    let shifted = ((value << (USER_BITS_OFFSET + offset)) as u16) & mask;
    Ok((states & !mask) | shifted)
}

/// Reads a user sub-field of `states`.
///
/// # Errors
///
/// Returns [`EncodingError::UserBitsOutOfRange`] for an invalid sub-field.
#[inline]
pub fn decode_user_bits(states: u16, offset: u32, width: u32) -> EncodingResult<u32> {
    let mask = user_bits_mask(offset, width)?;
    Ok(u32::from(states & mask) >> (USER_BITS_OFFSET + offset))
}

/// A single world cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Voxel {
    /// Block id.
    pub id: BlockId,
    /// Packed state word.
    pub states: u16,
}

impl Voxel {
    /// Empty cell.
    pub const AIR: Self = Self { id: BLOCK_AIR, states: 0 };

    /// Creates a voxel with default state.
    #[inline]
    #[must_use]
    pub const fn new(id: BlockId) -> Self {
        Self { id, states: 0 }
    }

    /// Creates a voxel with an explicit state word.
    #[inline]
    #[must_use]
    pub const fn with_states(id: BlockId, states: u16) -> Self {
        Self { id, states }
    }

    /// Returns true if this is an air voxel.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.id == BLOCK_AIR
    }

    /// Rotation index stored in the state word.
    #[inline]
    #[must_use]
    pub const fn rotation(self) -> u8 {
        decode_rotation(self.states)
    }

    /// Sets the rotation index.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::RotationOutOfRange`] if `rotation` does not fit.
    #[inline]
    pub fn set_rotation(&mut self, rotation: u8) -> EncodingResult<()> {
        self.states = encode_rotation(self.states, rotation)?;
        Ok(())
    }

    /// Reads a user sub-field.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UserBitsOutOfRange`] for an invalid sub-field.
    #[inline]
    pub fn user_bits(self, offset: u32, width: u32) -> EncodingResult<u32> {
        decode_user_bits(self.states, offset, width)
    }

    /// Writes a user sub-field.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UserBitsOutOfRange`] for an invalid sub-field.
    #[inline]
    pub fn set_user_bits(&mut self, value: u32, offset: u32, width: u32) -> EncodingResult<()> {
        self.states = encode_user_bits(self.states, value, offset, width)?;
        Ok(())
    }
}
