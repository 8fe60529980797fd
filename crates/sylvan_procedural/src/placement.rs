//! # Object Placement
//!
//! Scatters decorative occupants over a chunk by rejection sampling against
//! the vegetation field.
//!
//! ## Acceptance Rule
//!
//! A candidate at `(x, z)` with vegetation value `limit` is accepted iff
//!
//! ```text
//! acceptance >= 2 * (limit + 1)
//! ```
//!
//! where `acceptance` is uniform in `[0, 1)`. Only candidates sitting in
//! deep troughs of the field (`limit < -0.5`) can pass.
//!
//! ## Stored Height
//!
//! The `y` of a placed object is the raw `limit`, not a terrain height.
//! Renderers re-derive the ground height and reuse `y` as a rotation angle.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sylvan_shared::Vec3;

use crate::chunk::ChunkDims;
use crate::noise::NoiseField;

/// Default placement density factor.
pub const DEFAULT_DENSITY: f64 = 0.4;

/// How the per-chunk placement RNG is seeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSeeding {
    /// Seeded from the world seed and chunk coordinate. Same world, same trees.
    #[default]
    World,
    /// Seeded from OS entropy. Trees differ between runs of the same world.
    Entropy,
}

/// Positions produced by one placement pass, in chunk-local coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacedObjects {
    /// Large occupants (trees), in acceptance order.
    pub large: Vec<Vec3>,
    /// Small occupants (stumps, rocks), in acceptance order.
    pub small: Vec<Vec3>,
}

impl PlacedObjects {
    /// Total number of placed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.large.len() + self.small.len()
    }

    /// True when no trial was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.large.is_empty() && self.small.is_empty()
    }

    /// Large objects first, then small ones.
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.large.iter().chain(self.small.iter())
    }
}

/// Density-threshold scatterer over the vegetation field.
pub struct ObjectPlacer<N> {
    field: N,
    density: f64,
}

impl<N: NoiseField> ObjectPlacer<N> {
    /// Creates a placer with the default density.
    #[must_use]
    pub fn new(field: N) -> Self {
        Self {
            field,
            density: DEFAULT_DENSITY,
        }
    }

    /// Overrides the density factor.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// The density factor.
    #[inline]
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Number of trials for a chunk: `ceil(width * height * density^2)`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn trial_count(&self, dims: ChunkDims) -> usize {
        let trials = (dims.width * dims.height) as f64 * self.density * self.density;
        if trials.is_finite() && trials > 0.0 {
            trials.ceil() as usize
        } else {
            0
        }
    }

    /// Runs the placement trials for one chunk.
    ///
    /// Each trial draws a large candidate and then a small candidate, each
    /// as `(x, z, acceptance)` from `rng`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn place<R: Rng + ?Sized>(&self, dims: ChunkDims, rng: &mut R) -> PlacedObjects {
        let mut objects = PlacedObjects::default();
        let width = dims.width as f32;
        let height = dims.height as f32;

        for _ in 0..self.trial_count(dims) {
            if let Some(pos) = self.trial(width, height, rng) {
                objects.large.push(pos);
            }
            if let Some(pos) = self.trial(width, height, rng) {
                objects.small.push(pos);
            }
        }

        objects
    }

    #[allow(clippy::cast_possible_truncation)]
    fn trial<R: Rng + ?Sized>(&self, width: f32, height: f32, rng: &mut R) -> Option<Vec3> {
        let x = rng.gen::<f32>() * width;
        let z = rng.gen::<f32>() * height;
        let acceptance = rng.gen::<f64>();
        let limit = self.field.eval(f64::from(x), f64::from(z));

        accepts(acceptance, limit).then(|| Vec3::new(x, limit as f32, z))
    }
}

/// The acceptance rule. See the module docs.
#[inline]
#[must_use]
pub fn accepts(acceptance: f64, limit: f64) -> bool {
    acceptance >= 2.0 * (limit + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Field with the same value everywhere.
    struct Flat(f64);

    impl NoiseField for Flat {
        fn eval(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_acceptance_rule() {
        assert!(accepts(0.0, -1.0));
        assert!(accepts(0.5, -0.75));
        assert!(!accepts(0.49, -0.75));
        assert!(!accepts(0.999, -0.5));
        assert!(!accepts(0.999, 1.0));
    }

    #[test]
    fn test_trial_count() {
        let placer = ObjectPlacer::new(Flat(0.0)).with_density(0.5);
        // 10 * 10 * 0.25
        assert_eq!(placer.trial_count(ChunkDims::new(10, 10)), 25);
        // 9 * 9 * 0.25 = 20.25
        assert_eq!(placer.trial_count(ChunkDims::new(9, 9)), 21);
        assert_eq!(placer.with_density(0.0).trial_count(ChunkDims::new(9, 9)), 0);
    }

    #[test]
    fn test_trough_accepts_everything() {
        let placer = ObjectPlacer::new(Flat(-1.0)).with_density(0.5);
        let dims = ChunkDims::new(10, 10);
        let objects = placer.place(dims, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(objects.large.len(), 25);
        assert_eq!(objects.small.len(), 25);
        for pos in objects.iter() {
            assert_eq!(pos.y, -1.0, "stored y is the raw noise limit");
            assert!((0.0..10.0).contains(&pos.x));
            assert!((0.0..10.0).contains(&pos.z));
        }
    }

    #[test]
    fn test_crest_accepts_nothing() {
        let placer = ObjectPlacer::new(Flat(-0.4));
        let objects = placer.place(ChunkDims::new(65, 65), &mut ChaCha8Rng::seed_from_u64(1));
        assert!(objects.is_empty());
        assert_eq!(objects.len(), 0);
    }

    #[test]
    fn test_same_rng_same_layout() {
        let placer = ObjectPlacer::new(Flat(-0.9));
        let dims = ChunkDims::new(17, 17);
        let a = placer.place(dims, &mut ChaCha8Rng::seed_from_u64(77));
        let b = placer.place(dims, &mut ChaCha8Rng::seed_from_u64(77));
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
