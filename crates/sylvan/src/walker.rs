//! # Walker
//!
//! Tracks the player in coordinates local to the world's active chunk.
//!
//! ## Seam Wrapping
//!
//! Local `x` and `z` stay within `[0, chunk_size]`. Stepping past an edge
//! shifts the position back by one chunk and moves the world focus the
//! same way:
//!
//! ```text
//! x < 0     -> x += size, West
//! z < 0     -> z += size, South
//! x > size  -> x -= size, East
//! z > size  -> z -= size, North
//! ```
//!
//! Landing exactly on `0` or `size` does not wrap; both chunks own the seam.

use sylvan_procedural::{ChunkStore, Direction, NoiseField, TerrainResult, World};
use sylvan_shared::Vec3;

use crate::view::ViewFlags;

/// Height of the eye above the terrain surface (world units).
pub const DEFAULT_EYE_HEIGHT: f32 = 2.0;

/// Spawn altitude before the first settle.
const SPAWN_HEIGHT: f32 = 50.0;

/// The player position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walker {
    position: Vec3,
    eye_height: f32,
}

impl Walker {
    /// Creates a walker at an active-chunk local position.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            eye_height: DEFAULT_EYE_HEIGHT,
        }
    }

    /// Creates a walker hovering over the centre of the active chunk.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spawn<N: NoiseField, S: ChunkStore>(world: &World<N, S>) -> Self {
        let half = world.chunk_size() as f32 / 2.0;
        Self::new(Vec3::new(half, SPAWN_HEIGHT, half))
    }

    /// Overrides the eye height.
    #[must_use]
    pub const fn with_eye_height(mut self, eye_height: f32) -> Self {
        self.eye_height = eye_height;
        self
    }

    /// Active-chunk local eye position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Eye height above the ground.
    #[inline]
    #[must_use]
    pub const fn eye_height(&self) -> f32 {
        self.eye_height
    }

    /// Moves by `delta` if the destination is clear.
    ///
    /// Placed objects block the move unless `noclip` is on. Returns whether
    /// the move was taken.
    pub fn try_move<N: NoiseField, S: ChunkStore>(
        &mut self,
        world: &World<N, S>,
        delta: Vec3,
        flags: &ViewFlags,
    ) -> bool {
        let candidate = self.position + delta;
        if flags.noclip || world.is_valid(candidate) {
            self.position = candidate;
            true
        } else {
            false
        }
    }

    /// Wraps the position across chunk seams and stands it on the ground.
    ///
    /// Call once per frame after movement.
    ///
    /// # Errors
    ///
    /// Propagates [`World::update_pos`] failures.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn settle<N: NoiseField, S: ChunkStore>(
        &mut self,
        world: &mut World<N, S>,
        flags: &ViewFlags,
    ) -> TerrainResult<()> {
        let size = world.chunk_size() as f32;

        if self.position.x < 0.0 {
            world.update_pos(Direction::West)?;
            self.position.x += size;
        }
        if self.position.z < 0.0 {
            world.update_pos(Direction::South)?;
            self.position.z += size;
        }
        if self.position.x > size {
            world.update_pos(Direction::East)?;
            self.position.x -= size;
        }
        if self.position.z > size {
            world.update_pos(Direction::North)?;
            self.position.z -= size;
        }

        if !flags.noclip {
            let ground = world.interpolate_height(f64::from(self.position.x), f64::from(self.position.z));
            self.position.y = ground as f32 + self.eye_height;
        }

        Ok(())
    }
}
