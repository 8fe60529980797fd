//! # Chunk System
//!
//! The world is an infinite grid of square chunks. Each chunk owns:
//! - a heightmap of `(size + 1) x (size + 1)` samples (shared seams)
//! - the large and small objects scattered over it
//!
//! Chunks are built once by [`ChunkGenerator`] and never mutated again.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sylvan_shared::Vec3;

use crate::error::TerrainResult;
use crate::heightmap::{Heightmap, HeightmapGenerator};
use crate::noise::{NoiseField, SimplexNoise, WorldSeed};
use crate::placement::{ObjectPlacer, PlacedObjects, PlacementSeeding};

/// Radius within which a placed object blocks a point (world units).
pub const COLLISION_RADIUS: f32 = 1.0;

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Primary axis (east is +1).
    pub x: i32,
    /// Secondary axis (north is +1).
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)` chunks.
    ///
    /// Plain `i32` addition. Use [`ChunkCoord::checked_offset`] where the
    /// result may leave the grid.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Shifted coordinate, or `None` if either axis overflows `i32`.
    #[inline]
    #[must_use]
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }

    /// True if a window of `view_distance` anchored here, covering
    /// `[self, self + 2 * view_distance]` on both axes, fits on the grid.
    #[must_use]
    pub fn fits_window(self, view_distance: u32) -> bool {
        view_distance
            .checked_mul(2)
            .and_then(|span| i32::try_from(span).ok())
            .and_then(|span| self.checked_offset(span, span))
            .is_some()
    }

    /// Packs both axes into one key for seed derivation.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }
}

/// Sample-grid dimensions of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkDims {
    /// Samples along the primary axis.
    pub width: usize,
    /// Samples along the secondary axis.
    pub height: usize,
}

impl ChunkDims {
    /// Creates dimensions from raw sample counts.
    #[inline]
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Sample dimensions for a square chunk of nominal `size`.
    ///
    /// One extra sample per axis so neighbours share their seam.
    #[inline]
    #[must_use]
    pub const fn from_chunk_size(size: usize) -> Self {
        Self::new(size + 1, size + 1)
    }
}

/// A generated chunk.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    dims: ChunkDims,
    heightmap: Heightmap,
    objects: PlacedObjects,
}

impl Chunk {
    /// Assembles a chunk from already generated parts.
    #[must_use]
    pub fn from_parts(coord: ChunkCoord, heightmap: Heightmap, objects: PlacedObjects) -> Self {
        Self {
            coord,
            dims: ChunkDims::new(heightmap.width(), heightmap.height()),
            heightmap,
            objects,
        }
    }

    /// Grid coordinate of this chunk.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Sample-grid dimensions.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// The cached height samples.
    #[inline]
    #[must_use]
    pub const fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    /// Height at integer local coordinates.
    ///
    /// # Errors
    ///
    /// Returns `TerrainError::OutOfBounds` outside `[0, width) x [0, height)`.
    #[inline]
    pub fn height_at(&self, x: usize, y: usize) -> TerrainResult<f64> {
        self.heightmap.get(y, x)
    }

    /// Placed large objects (trees), chunk-local.
    #[inline]
    #[must_use]
    pub fn large_objects(&self) -> &[Vec3] {
        &self.objects.large
    }

    /// Placed small objects (stumps, rocks), chunk-local.
    #[inline]
    #[must_use]
    pub fn small_objects(&self) -> &[Vec3] {
        &self.objects.small
    }

    /// Returns false if `point` lies within [`COLLISION_RADIUS`] of any
    /// placed object.
    ///
    /// The test runs in the horizontal slice at each object's own stored
    /// height, so the caller's `y` never matters.
    #[must_use]
    pub fn is_valid(&self, point: Vec3) -> bool {
        match self
            .objects
            .iter()
            .find(|object| point.with_y(object.y).distance(**object) < COLLISION_RADIUS)
        {
            Some(object) => {
                tracing::trace!(x = object.x, z = object.z, "collided");
                false
            }
            None => true,
        }
    }
}

/// Chunk generator using procedural noise.
///
/// Runs the heightmap pass, then the placement pass.
pub struct ChunkGenerator<N = SimplexNoise> {
    heights: HeightmapGenerator<N>,
    placer: ObjectPlacer<N>,
    dims: ChunkDims,
    seed: WorldSeed,
    seeding: PlacementSeeding,
}

impl ChunkGenerator<SimplexNoise> {
    /// Creates a generator with simplex terrain and vegetation fields
    /// derived from `seed`.
    #[must_use]
    pub fn from_seed(seed: WorldSeed, chunk_size: usize) -> Self {
        Self::new(
            SimplexNoise::new(seed),
            SimplexNoise::new(seed.vegetation()),
            seed,
            chunk_size,
        )
    }
}

impl<N: NoiseField> ChunkGenerator<N> {
    /// Creates a generator from explicit terrain and vegetation fields.
    #[must_use]
    pub fn new(terrain: N, vegetation: N, seed: WorldSeed, chunk_size: usize) -> Self {
        Self {
            heights: HeightmapGenerator::new(terrain),
            placer: ObjectPlacer::new(vegetation),
            dims: ChunkDims::from_chunk_size(chunk_size),
            seed,
            seeding: PlacementSeeding::default(),
        }
    }

    /// Overrides the heightmap scales.
    #[must_use]
    pub fn with_scales(mut self, horizontal: f64, vertical: f64) -> Self {
        self.heights = self.heights.with_scales(horizontal, vertical);
        self
    }

    /// Overrides the placement density.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.placer = self.placer.with_density(density);
        self
    }

    /// Overrides how placement randomness is seeded.
    #[must_use]
    pub fn with_seeding(mut self, seeding: PlacementSeeding) -> Self {
        self.seeding = seeding;
        self
    }

    /// Sample dimensions of every chunk this generator builds.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// The heightmap pass.
    #[inline]
    pub fn heights(&self) -> &HeightmapGenerator<N> {
        &self.heights
    }

    /// Generates the chunk at `coord`.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        tracing::debug!(
            x = coord.x,
            y = coord.y,
            width = self.dims.width - 1,
            height = self.dims.height - 1,
            "generating chunk"
        );

        let heightmap = self.heights.generate(coord, self.dims);

        let mut rng = match self.seeding {
            PlacementSeeding::World => ChaCha8Rng::seed_from_u64(self.seed.derive(coord.key()).value()),
            PlacementSeeding::Entropy => ChaCha8Rng::from_entropy(),
        };
        let objects = self.placer.place(self.dims, &mut rng);

        tracing::trace!(trees = objects.large.len(), things = objects.small.len(), "placed objects");

        Chunk::from_parts(coord, heightmap, objects)
    }

    /// Bilinear terrain height at real local coordinates of `chunk`.
    #[must_use]
    pub fn interpolate_height(&self, chunk: &Chunk, x: f64, y: f64) -> f64 {
        self.heights.interpolate(chunk.coord(), chunk.dims(), x, y)
    }
}
