//! # Perlin Noise Implementation
//!
//! Improved gradient noise over 3D coordinates, plus its fractal sum.
//!
//! ## Permutation Table
//!
//! The lattice hash uses a fixed 256-entry permutation, doubled to 512
//! entries so corner lookups never wrap. The table is built on first use
//! and is read-only afterwards, so any number of threads may sample noise
//! concurrently.
//!
//! ## Determinism Guarantee
//!
//! The table never depends on the seed. Seeds enter terrain generation by
//! shifting sample coordinates (see [`crate::terrain::TerrainOffsets`]),
//! so a given `(x, y, z)` always yields bit-identical output.

use std::sync::OnceLock;

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Purpose tag for per-chunk random streams.
    const CHUNK_STREAM: u64 = 0x4348_554E_4B52_4E47;

    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a hash mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Derives the seed of one chunk's random stream.
    #[inline]
    #[must_use]
    pub const fn derive_chunk(self, chunk_x: i32, chunk_z: i32) -> Self {
        let packed = (chunk_x as u32 as u64) | ((chunk_z as u32 as u64) << 32);
        self.derive(Self::CHUNK_STREAM).derive(packed)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}

impl From<u64> for WorldSeed {
    fn from(seed: u64) -> Self {
        Self(seed)
    }
}

/// Ken Perlin's reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137,  91,  90,  15, 131,  13, 201,  95,  96,  53, 194, 233,   7, 225,
    140,  36, 103,  30,  69, 142,   8,  99,  37, 240,  21,  10,  23, 190,   6, 148,
    247, 120, 234,  75,   0,  26, 197,  62,  94, 252, 219, 203, 117,  35,  11,  32,
     57, 177,  33,  88, 237, 149,  56,  87, 174,  20, 125, 136, 171, 168,  68, 175,
     74, 165,  71, 134, 139,  48,  27, 166,  77, 146, 158, 231,  83, 111, 229, 122,
     60, 211, 133, 230, 220, 105,  92,  41,  55,  46, 245,  40, 244, 102, 143,  54,
     65,  25,  63, 161,   1, 216,  80,  73, 209,  76, 132, 187, 208,  89,  18, 169,
    200, 196, 135, 130, 116, 188, 159,  86, 164, 100, 109, 198, 173, 186,   3,  64,
     52, 217, 226, 250, 124, 123,   5, 202,  38, 147, 118, 126, 255,  82,  85, 212,
    207, 206,  59, 227,  47,  16,  58,  17, 182, 189,  28,  42, 223, 183, 170, 213,
    119, 248, 152,   2,  44, 154, 163,  70, 221, 153, 101, 155, 167,  43, 172,   9,
    129,  22,  39, 253,  19,  98, 108, 110,  79, 113, 224, 232, 178, 185, 112, 104,
    218, 246,  97, 228, 251,  34, 242, 193, 238, 210, 144,  12, 191, 179, 162, 241,
     81,  51, 145, 235, 249,  14, 239, 107,  49, 192, 214,  31, 181, 199, 106, 157,
    184,  84, 204, 176, 115, 121,  50,  45, 127,   4, 150, 254, 138, 236, 205,  93,
    222, 114,  67,  29,  24,  72, 243, 141, 128, 195,  78,  66, 215,  61, 156, 180,
];

static TABLE: OnceLock<[u8; 512]> = OnceLock::new();

/// Builds the doubled permutation table on first call.
fn permutation_table() -> &'static [u8; 512] {
    TABLE.get_or_init(|| {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = PERMUTATION[i & 255];
        }
        tracing::debug!("perlin permutation table initialized");
        perm
    })
}

/// 3D Perlin noise sampler.
///
/// Cheap to copy; every instance shares the same read-only table.
///
/// # Example
///
/// ```rust
/// use stratum_procedural::noise::Perlin;
///
/// let perlin = Perlin::new();
/// let value = perlin.noise(10.5, 0.0, -3.25);
/// assert!((-1.0..=1.0).contains(&value));
///
/// let terrain = perlin.fbm(10.5, 0.0, -3.25, 6, 0.5);
/// assert!((-1.0..=1.0).contains(&terrain));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Perlin {
    perm: &'static [u8; 512],
}

impl Perlin {
    /// Default octave count of [`Self::fbm`] in terrain sums.
    pub const OCTAVES: u32 = 6;

    /// Default amplitude decay per octave.
    pub const PERSISTENCE: f64 = 0.5;

    /// Frequency growth per octave.
    pub const LACUNARITY: f64 = 2.0;

    /// Creates a sampler, initializing the permutation table if needed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            perm: permutation_table(),
        }
    }

    #[inline]
    fn hash(&self, index: usize) -> usize {
        usize::from(self.perm[index])
    }

    /// Samples noise at a point.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1]; exactly zero on integer lattice points.
    #[must_use]
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let zi = (zf as i64 & 255) as usize;

        let x = x - xf;
        let y = y - yf;
        let z = z - zf;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        // Hash the eight cube corners
        let a = self.hash(xi) + yi;
        let aa = self.hash(a) + zi;
        let ab = self.hash(a + 1) + zi;
        let b = self.hash(xi + 1) + yi;
        let ba = self.hash(b) + zi;
        let bb = self.hash(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(self.hash(aa), x, y, z), grad(self.hash(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(self.hash(ab), x, y - 1.0, z),
                    grad(self.hash(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(self.hash(aa + 1), x, y, z - 1.0),
                    grad(self.hash(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(self.hash(ab + 1), x, y - 1.0, z - 1.0),
                    grad(self.hash(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Generates fractal (FBM) noise.
    ///
    /// Sums `octaves` layers, doubling frequency and scaling amplitude by
    /// `persistence` each layer, then normalizes by the total amplitude.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1]. Zero octaves yield zero.
    #[must_use]
    pub fn fbm(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.noise(x * frequency, y * frequency, z * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= Self::LACUNARITY;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        total / max_amplitude
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

/// Quintic smoothing curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of 12 cube-edge gradients picked by `hash`.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
