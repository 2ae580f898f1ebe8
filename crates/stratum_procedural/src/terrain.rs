//! # Terrain Shaping
//!
//! Composite height field shared by the noise-driven generators.
//!
//! ## Layers
//!
//! | Layer | Scale | Weight |
//! |-------|-------|--------|
//! | Continent | 0.1 | 1 |
//! | Ridges | 0.2 | 0.5 |
//! | Hills | 0.4 | 0.25 |
//! | Warped detail | 1.6 (+/-50 warp at 0.8) | 0.25, gated at 0.01 |
//! | Fine detail | 0.8 | 0.125 |
//!
//! The sum is scaled by a 0.1-frequency mask remapped to [0, 1], biased
//! and stretched to world height, then flattened near sea level. The
//! shoreline blend uses a window of `|h - sea|` weighted by the cliff
//! factor, so gentle coasts flatten while cliffs stay abrupt.

use crate::error::GenResult;
use crate::heightmap::{BorderedMap, MapField};
use crate::noise::{Perlin, WorldSeed};

/// Sea level of the noise-driven generators.
pub const NOISE_SEA_LEVEL: i32 = 75;

/// How each layer of the composite height is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sampler {
    /// Six-octave fractal sum per layer.
    Fractal,
    /// Single noise sample per layer.
    Single,
}

/// Seed-derived world-space shift applied before sampling.
///
/// The permutation table is fixed, so different seeds read different
/// regions of the same noise field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainOffsets {
    /// Shift along X.
    pub x: f64,
    /// Shift along Z.
    pub z: f64,
}

impl TerrainOffsets {
    /// Offsets that leave coordinates unchanged.
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    /// Half-extent of the offset range.
    const RANGE: f64 = 65_536.0;

    /// Derives offsets from a world seed.
    #[must_use]
    pub fn from_seed(seed: WorldSeed) -> Self {
        Self {
            x: Self::spread(seed.derive(0x5445_5252_4149_4E58)),
            z: Self::spread(seed.derive(0x5445_5252_4149_4E5A)),
        }
    }

    /// Maps a hash to `[-RANGE, RANGE)` with a fractional part.
    fn spread(seed: WorldSeed) -> f64 {
        let unit = (seed.value() >> 11) as f64 / (1u64 << 53) as f64;
        unit.mul_add(2.0 * Self::RANGE, -Self::RANGE)
    }
}

/// Field values of one world column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnFields {
    /// Terrain height after shoreline blending.
    pub height: f64,
    /// Sand signal in [-1, 1].
    pub sand: f64,
    /// `max(sand, 0)`.
    pub cliff: f64,
}

/// Evaluates the composite height field.
#[derive(Clone, Copy, Debug)]
pub struct TerrainShaper {
    perlin: Perlin,
    sampler: Sampler,
    offsets: TerrainOffsets,
    sea_level: f64,
}

impl TerrainShaper {
    /// Creates a shaper for a seed.
    #[must_use]
    pub fn new(sampler: Sampler, seed: WorldSeed) -> Self {
        Self::with_offsets(sampler, TerrainOffsets::from_seed(seed))
    }

    /// Creates a shaper with explicit offsets.
    #[must_use]
    pub fn with_offsets(sampler: Sampler, offsets: TerrainOffsets) -> Self {
        Self {
            perlin: Perlin::new(),
            sampler,
            offsets,
            sea_level: f64::from(NOISE_SEA_LEVEL),
        }
    }

    /// Sets the level the shoreline blend flattens toward.
    #[must_use]
    pub fn with_sea_level(mut self, sea_level: i32) -> Self {
        self.sea_level = f64::from(sea_level);
        self
    }

    /// Sampling mode of every layer.
    #[must_use]
    pub const fn sampler(&self) -> Sampler {
        self.sampler
    }

    #[inline]
    fn sample(&self, x: f64, z: f64) -> f64 {
        match self.sampler {
            Sampler::Fractal => self.perlin.fbm(x, 0.0, z, Perlin::OCTAVES, Perlin::PERSISTENCE),
            Sampler::Single => self.perlin.noise(x, 0.0, z),
        }
    }

    /// Raw composite height before shoreline blending.
    fn raw_height(&self, x: f64, z: f64) -> f64 {
        let s = |a: f64, b: f64| self.sample(a, b);

        let mut height = s(x * 0.1 - 125_567.0, z * 0.1 + 3546.0);
        height += s(x * 0.2 + 4647.0, z * 0.2 - 3436.0) * 0.5;
        height += s(x * 0.4 - 834_176.0, z * 0.4 + 23_678.0) * 0.25;

        // Domain-warped detail, gated by a very low frequency mask
        let warp_x = s(x * 0.8 - 23_557.0, z * 0.8 - 6568.0) * 50.0;
        let warp_z = s(x * 0.8 + 4363.0, z * 0.8 + 4456.0) * 50.0;
        let gate = s(x * 0.01 - 834_176.0, z * 0.01 + 23_678.0);
        height += s(x * 1.6 + warp_x, z * 1.6 + warp_z) * gate * 0.25;

        height += s(x * 0.8 - 3465.0, z * 0.8 + 4534.0) * 0.125;
        height *= s(x * 0.1 + 1000.0, z * 0.1 + 1000.0) * 0.5 + 0.5;
        (height + 1.0) * 64.0
    }

    /// Computes the fields of one world column.
    #[must_use]
    pub fn column(&self, world_x: i32, world_z: i32) -> ColumnFields {
        let x = f64::from(world_x) + self.offsets.x;
        let z = f64::from(world_z) + self.offsets.z;

        let mut height = self.raw_height(x, z);
        let sand = self.sample(x * 0.1 - 633.0, z * 0.1 + 1000.0);
        let cliff = sand.max(0.0);

        // Shoreline window: non-zero only within 4 blocks of sea level
        let weight = ((4.0 - (height - self.sea_level).abs()).max(0.0) / 6.0).powi(2) * cliff;
        let mut step = ((height - self.sea_level + 0.04).abs() - (height - self.sea_level - 0.03).abs()) * 100.0;
        if sand > 0.7 {
            step *= 2.0;
        }
        height += 2.0 - step * weight;

        ColumnFields { height, sand, cliff }
    }

    /// Populates every column of a bordered map.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::GenerationError::OutOfWindow`]; unreachable for
    /// columns produced by the map itself.
    pub fn fill_window(&self, map: &mut BorderedMap) -> GenResult<()> {
        let columns: Vec<(i32, i32)> = map.columns().collect();
        for (x, z) in columns {
            let fields = self.column(x, z);
            map.set(MapField::Height, x, z, fields.height)?;
            map.set(MapField::Sand, x, z, fields.sand)?;
            map.set(MapField::Cliff, x, z, fields.cliff)?;
        }
        Ok(())
    }
}

/// Reads all fields of a column from a filled map.
///
/// # Errors
///
/// Returns [`crate::GenerationError::OutOfWindow`] outside the window.
pub fn read_column(map: &BorderedMap, x: i32, z: i32) -> GenResult<ColumnFields> {
    Ok(ColumnFields {
        height: map.get(MapField::Height, x, z)?,
        sand: map.get(MapField::Sand, x, z)?,
        cliff: map.get(MapField::Cliff, x, z)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_depend_on_seed() {
        let a = TerrainOffsets::from_seed(WorldSeed::new(1));
        let b = TerrainOffsets::from_seed(WorldSeed::new(2));
        assert_ne!(a, b);
        assert_eq!(a, TerrainOffsets::from_seed(WorldSeed::new(1)));
        assert!(a.x.abs() <= TerrainOffsets::RANGE && a.z.abs() <= TerrainOffsets::RANGE);
        assert_ne!(a.x, a.z);
    }

    #[test]
    fn test_column_is_deterministic() {
        let shaper = TerrainShaper::new(Sampler::Fractal, WorldSeed::new(99));
        let again = TerrainShaper::new(Sampler::Fractal, WorldSeed::new(99));
        for i in -20..20 {
            let a = shaper.column(i * 7, i * -3);
            let b = again.column(i * 7, i * -3);
            assert_eq!(a.height.to_bits(), b.height.to_bits());
            assert_eq!(a.sand.to_bits(), b.sand.to_bits());
        }
    }

    #[test]
    fn test_cliff_is_one_sided() {
        let shaper = TerrainShaper::new(Sampler::Single, WorldSeed::new(5));
        for i in 0..200 {
            let fields = shaper.column(i * 3, i * 5);
            assert!(fields.cliff >= 0.0);
            assert_eq!(fields.cliff, fields.sand.max(0.0));
        }
    }

    #[test]
    fn test_heights_stay_in_world() {
        for sampler in [Sampler::Fractal, Sampler::Single] {
            let shaper = TerrainShaper::new(sampler, WorldSeed::new(1234));
            for i in 0..500 {
                let h = shaper.column(i * 13 - 3000, i * 11 - 2000).height;
                assert!(h.is_finite());
                assert!((-64.0..=256.0).contains(&h), "height {h} out of range");
            }
        }
    }

    #[test]
    fn test_fill_window_matches_direct_evaluation() {
        let shaper = TerrainShaper::new(Sampler::Fractal, WorldSeed::new(3));
        let mut map = BorderedMap::for_chunk(32, -16, 16, 16, 8).unwrap();
        shaper.fill_window(&mut map).unwrap();

        for (x, z) in [(24, -24), (39, 0), (55, 7)] {
            assert_eq!(read_column(&map, x, z).unwrap(), shaper.column(x, z));
        }
    }
}
