//! # Bordered Height Map
//!
//! Per-column scalar fields for one chunk plus a padding border.
//!
//! The window covers
//! `[origin_x - pad, origin_x + W + pad) x [origin_z - pad, origin_z + D + pad)`
//! in world coordinates. Columns near the chunk edge read their neighbours
//! from the border, which holds exactly the values the adjacent chunk
//! computes for the same world columns.
//!
//! Access outside the window returns [`GenerationError::OutOfWindow`].
//! Construction refuses windows whose far edge is not an `i32`, so every
//! world coordinate inside a window is representable.

use crate::error::{GenResult, GenerationError};

/// Scalar fields stored per column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapField {
    /// Final terrain height.
    Height,
    /// Secondary sand signal.
    Sand,
    /// One-sided cliff factor derived from sand.
    Cliff,
}

impl MapField {
    /// Number of fields.
    pub const COUNT: usize = 3;

    const fn slot(self) -> usize {
        match self {
            Self::Height => 0,
            Self::Sand => 1,
            Self::Cliff => 2,
        }
    }
}

/// Padded 2D window of per-column fields, addressed by world coordinates.
#[derive(Clone, Debug)]
pub struct BorderedMap {
    /// World X of the first column.
    x: i32,
    /// World Z of the first column.
    z: i32,
    /// Columns along X.
    width: usize,
    /// Columns along Z.
    depth: usize,
    /// One `width * depth` plane per field, row-major in Z.
    fields: [Vec<f64>; MapField::COUNT],
}

impl BorderedMap {
    /// Allocates a zeroed window starting at world `(x, z)`.
    ///
    /// Returns `None` if `x + width` or `z + depth` overflows `i32`.
    #[must_use]
    pub fn new(x: i32, z: i32, width: usize, depth: usize) -> Option<Self> {
        i32::try_from(width).ok()?.checked_add(x)?;
        i32::try_from(depth).ok()?.checked_add(z)?;
        let plane = width.checked_mul(depth)?;
        Some(Self {
            x,
            z,
            width,
            depth,
            fields: [vec![0.0; plane], vec![0.0; plane], vec![0.0; plane]],
        })
    }

    /// Allocates the window for a chunk footprint padded by `padding` columns.
    ///
    /// Returns `None` if any edge of the padded window overflows `i32`.
    #[must_use]
    pub fn for_chunk(origin_x: i32, origin_z: i32, width: usize, depth: usize, padding: usize) -> Option<Self> {
        let pad = i32::try_from(padding).ok()?;
        let border = padding.checked_mul(2)?;
        Self::new(
            origin_x.checked_sub(pad)?,
            origin_z.checked_sub(pad)?,
            width.checked_add(border)?,
            depth.checked_add(border)?,
        )
    }

    /// World X of the first column in the window.
    #[must_use]
    pub const fn min_x(&self) -> i32 {
        self.x
    }

    /// World Z of the first column in the window.
    #[must_use]
    pub const fn min_z(&self) -> i32 {
        self.z
    }

    /// One past the last world X in the window. Never overflows.
    #[must_use]
    pub const fn max_x(&self) -> i32 {
        self.x + self.width as i32
    }

    /// One past the last world Z in the window.
    #[must_use]
    pub const fn max_z(&self) -> i32 {
        self.z + self.depth as i32
    }

    /// Returns true if the world column lies inside the window.
    #[must_use]
    pub const fn contains(&self, x: i32, z: i32) -> bool {
        x >= self.min_x() && x < self.max_x() && z >= self.min_z() && z < self.max_z()
    }

    fn slot(&self, x: i32, z: i32) -> GenResult<usize> {
        if !self.contains(x, z) {
            return Err(GenerationError::OutOfWindow {
                x,
                z,
                min_x: self.min_x(),
                min_z: self.min_z(),
                max_x: self.max_x(),
                max_z: self.max_z(),
            });
        }
        let local_x = (x - self.x) as usize;
        let local_z = (z - self.z) as usize;
        Ok(local_z * self.width + local_x)
    }

    /// Reads a field at a world column.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::OutOfWindow`] outside the window.
    #[inline]
    pub fn get(&self, field: MapField, x: i32, z: i32) -> GenResult<f64> {
        let slot = self.slot(x, z)?;
        Ok(self.fields[field.slot()][slot])
    }

    /// Writes a field at a world column.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::OutOfWindow`] outside the window.
    #[inline]
    pub fn set(&mut self, field: MapField, x: i32, z: i32, value: f64) -> GenResult<()> {
        let slot = self.slot(x, z)?;
        self.fields[field.slot()][slot] = value;
        Ok(())
    }

    /// Iterates over every world column in the window, Z-major.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x0, z0) = (self.x, self.z);
        let (width, depth) = (self.width as i32, self.depth as i32);
        (0..depth).flat_map(move |dz| (0..width).map(move |dx| (x0 + dx, z0 + dz)))
    }
}
