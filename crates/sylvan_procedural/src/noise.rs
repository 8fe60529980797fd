//! # Noise Fields
//!
//! Deterministic continuous noise, the generator's only source of variation.
//!
//! ## Two Fields, One Seed
//!
//! A world samples two independent fields: one shapes the terrain, the
//! other drives vegetation placement. Both are derived from the single
//! world seed (see [`WorldSeed::vegetation`]) and their outputs are never
//! mixed.
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed`, [`SimplexNoise`] produces **exactly** the
//! same values on any platform, any time. Adjacent chunks rely on this to
//! compute identical seam heights.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A deterministic, continuous scalar field over the plane.
///
/// Implementations must be pure: the same `(x, y)` always yields the same
/// value in `[-1, 1]`, and evaluation has no observable side effects on
/// other evaluations.
pub trait NoiseField {
    /// Evaluates the field at real coordinates.
    fn eval(&self, x: f64, y: f64) -> f64;
}

impl<T: NoiseField + ?Sized> NoiseField for &T {
    #[inline]
    fn eval(&self, x: f64, y: f64) -> f64 {
        (**self).eval(x, y)
    }
}

impl<T: NoiseField + ?Sized> NoiseField for Arc<T> {
    #[inline]
    fn eval(&self, x: f64, y: f64) -> f64 {
        (**self).eval(x, y)
    }
}

/// Purpose key for vegetation seeds that cannot be tripled.
const VEGETATION_PURPOSE: u64 = 0x7665_6765_7461_7465;

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSeed(u64);

impl WorldSeed {
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

    /// Seed of the vegetation field paired with this terrain seed.
    ///
    /// Normally `seed * 3` (wrapping). Seeds `0` and `2^63` are fixed points
    /// of that product, so those two take a derived seed instead and the
    /// vegetation field never equals the terrain field.
    #[inline]
    #[must_use]
    pub const fn vegetation(self) -> Self {
        let tripled = self.0.wrapping_mul(3);
        if tripled == self.0 {
            self.derive(VEGETATION_PURPOSE)
        } else {
            Self(tripled)
        }
    }

    /// Derives a sub-seed for a specific purpose (e.g. one chunk's placement).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0x5EED_CAFE_BABE)
    }
}

/// Shuffle state used when the mixed seed is zero.
const ZERO_STATE_FALLBACK: u64 = 0x2545_F491_4F6C_DD1D;

/// One splitmix64 step. A bijection on `u64`, so distinct seeds never share
/// a shuffle state.
#[inline]
const fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Pre-computed permutation table for noise.
///
/// This is computed once from the seed and reused.
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
}

impl PermutationTable {
    /// 12 gradient vectors for 2D simplex.
    const GRADIENTS: [[i8; 2]; 12] = [
        [1, 0], [1, 1], [0, 1], [-1, 1],
        [-1, 0], [-1, -1], [0, -1], [1, -1],
        [1, 0], [0, 1], [-1, 0], [0, -1],
    ];

    /// Creates a new permutation table from a seed.
    #[allow(clippy::cast_possible_truncation)]
    fn new(seed: WorldSeed) -> Self {
        let mut perm = [0u8; 512];

        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates with xorshift64, seeded through a bijective mix.
        let mut rng_state = match splitmix64(seed.value()) {
            0 => ZERO_STATE_FALLBACK,
            mixed => mixed,
        };
        for i in (1..256).rev() {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;

            let j = (rng_state as usize) % (i + 1);
            perm.swap(i, j);
        }

        let (low, high) = perm.split_at_mut(256);
        high.copy_from_slice(low);

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    #[inline]
    fn gradient(hash: u8) -> [i8; 2] {
        Self::GRADIENTS[(hash % 12) as usize]
    }
}

/// 2D Simplex noise generator.
///
/// Produces smooth, continuous noise values in the range [-1, 1].
///
/// # Example
///
/// ```rust,ignore
/// let noise = SimplexNoise::new(WorldSeed::new(42));
/// let value = noise.sample(100.5, 200.3);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
pub struct SimplexNoise {
    perm_table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for 2D simplex grid, (sqrt(3) - 1) / 2.
    const F2: f64 = 0.366_025_403_784_439;
    /// Unskewing factor for 2D simplex grid, (3 - sqrt(3)) / 6.
    const G2: f64 = 0.211_324_865_405_187;

    /// Creates a new simplex noise generator from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples 2D simplex noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::many_single_char_names)]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        let unskew = f64::from(i + j) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Upper or lower triangle of the skewed cell
        let (i1, j1, step_x, step_y) = if x0 > y0 {
            (1usize, 0usize, 1.0, 0.0)
        } else {
            (0, 1, 0.0, 1.0)
        };

        let x1 = x0 - step_x + Self::G2;
        let y1 = y0 - step_y + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;

        let table = &self.perm_table;
        let gi0 = table.get(ii + table.get(jj) as usize);
        let gi1 = table.get(ii + i1 + table.get(jj + j1) as usize);
        let gi2 = table.get(ii + 1 + table.get(jj + 1) as usize);

        let n0 = Self::contribution(x0, y0, gi0);
        let n1 = Self::contribution(x1, y1, gi1);
        let n2 = Self::contribution(x2, y2, gi2);

        // 70 normalizes the corner sum to [-1, 1]
        70.0 * (n0 + n1 + n2)
    }

    #[inline]
    fn contribution(x: f64, y: f64, gradient_index: u8) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let grad = PermutationTable::gradient(gradient_index);
            let t2 = t * t;
            t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
        }
    }

    /// Generates octaved (fractal) noise.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Coordinates
    /// * `octaves` - Number of noise layers (typically 4-8)
    /// * `persistence` - Amplitude decay per octave (typically 0.5)
    /// * `lacunarity` - Frequency increase per octave (typically 2.0)
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}

impl NoiseField for SimplexNoise {
    #[inline]
    fn eval(&self, x: f64, y: f64) -> f64 {
        self.sample(x, y).clamp(-1.0, 1.0)
    }
}

/// Floor to `i32` without going through `f64::floor`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi - 1 } else { xi }
}
