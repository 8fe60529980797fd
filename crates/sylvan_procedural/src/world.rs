//! # World Window Manager
//!
//! Owns the chunk store and the display window: the square of
//! `(2 * vd + 1)^2` chunks whose coordinates lie in
//! `[focus, focus + 2 * vd]` on both axes.
//!
//! ## Loading
//!
//! Every focus change recomputes the window from scratch:
//!
//! ```text
//! 1. clear the window
//! 2. refuse view distances >= MAX_VIEW_DISTANCE
//! 3. mark every window cell absent
//! 4. pull cells already in the store, mark them present
//! 5. generate each absent cell, store it, add it to the window
//! 6. the active chunk is the cell at focus + (vd, vd)
//! ```
//!
//! Generation runs inline: a move that uncovers a full column of cells
//! pays for all of them before `update_pos` returns.
//!
//! ## Window Order
//!
//! The window is kept in cell order, `index = dx * side + dy`, so the
//! active chunk is always the centre cell.

use std::sync::Arc;

use sylvan_shared::Vec3;

use crate::chunk::{Chunk, ChunkCoord, ChunkGenerator};
use crate::config::{StorePolicy, WorldConfig, MAX_VIEW_DISTANCE};
use crate::error::{TerrainError, TerrainResult};
use crate::noise::{NoiseField, SimplexNoise};
use crate::storage::{ChunkStore, LruStore, UnboundedStore};

/// Direction of a one-chunk focus move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// +1 on the secondary axis.
    North,
    /// -1 on the secondary axis.
    South,
    /// +1 on the primary axis.
    East,
    /// -1 on the primary axis.
    West,
}

impl Direction {
    /// Grid delta `(dx, dy)` of one step in this direction.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// Session counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// Chunks generated this session.
    pub generated: u64,
    /// Window cells served from the store.
    pub reused: u64,
    /// Completed `load_chunks` passes.
    pub loads: u64,
    /// Chunks dropped by the store's retention policy.
    pub evicted: u64,
}

/// The streamed terrain around one focus point.
pub struct World<N = SimplexNoise, S = Box<dyn ChunkStore>> {
    generator: ChunkGenerator<N>,
    store: S,
    focus: ChunkCoord,
    view_distance: u32,
    window: Vec<Arc<Chunk>>,
    stats: WorldStats,
}

impl World {
    /// Builds a world from configuration and loads its first window.
    ///
    /// # Errors
    ///
    /// Returns any [`WorldConfig::validate`] error.
    pub fn new(config: &WorldConfig) -> TerrainResult<Self> {
        config.validate()?;

        let generator = ChunkGenerator::from_seed(config.seed, config.chunk_size)
            .with_scales(config.horizontal_scale, config.vertical_scale)
            .with_density(config.density)
            .with_seeding(config.placement_seeding);

        let store: Box<dyn ChunkStore> = match config.store {
            StorePolicy::Unbounded => Box::new(UnboundedStore::new()),
            StorePolicy::Lru { capacity } => Box::new(LruStore::new(capacity)),
        };

        tracing::info!(
            seed = config.seed.value(),
            chunk_size = config.chunk_size,
            view_distance = config.view_distance,
            "creating world"
        );

        Self::with_parts(generator, store, config.start, config.view_distance)
    }
}

impl<N: NoiseField, S: ChunkStore> World<N, S> {
    /// Builds a world from explicit parts and loads its first window.
    ///
    /// # Errors
    ///
    /// Returns `ViewDistanceTooLarge` if `view_distance >= MAX_VIEW_DISTANCE`
    /// and `OffGrid` if the window at `focus` does not fit on the grid.
    pub fn with_parts(
        generator: ChunkGenerator<N>,
        store: S,
        focus: ChunkCoord,
        view_distance: u32,
    ) -> TerrainResult<Self> {
        let mut world = Self {
            generator,
            store,
            focus,
            view_distance,
            window: Vec::new(),
            stats: WorldStats::default(),
        };
        world.load_chunks()?;
        Ok(world)
    }

    /// Recomputes the display window around the current focus.
    ///
    /// # Errors
    ///
    /// Returns `ViewDistanceTooLarge` if the view distance is at or above
    /// [`MAX_VIEW_DISTANCE`], or `OffGrid` if the window leaves the grid.
    /// The window is left empty in both cases.
    pub fn load_chunks(&mut self) -> TerrainResult<()> {
        self.window.clear();

        if self.view_distance >= MAX_VIEW_DISTANCE {
            return Err(TerrainError::ViewDistanceTooLarge {
                requested: self.view_distance,
                max: MAX_VIEW_DISTANCE,
            });
        }
        if !self.focus.fits_window(self.view_distance) {
            return Err(self.off_grid());
        }

        let side = self.side();
        let mut cells: Vec<Option<Arc<Chunk>>> = vec![None; side * side];

        for (index, cell) in cells.iter_mut().enumerate() {
            let coord = self.cell_coord(index);
            if let Some(chunk) = self.store.get(coord) {
                tracing::trace!(x = coord.x, y = coord.y, "loading chunk");
                self.stats.reused += 1;
                *cell = Some(chunk);
            }
        }

        for (index, cell) in cells.iter_mut().enumerate() {
            if cell.is_some() {
                continue;
            }
            let chunk = Arc::new(self.generator.generate(self.cell_coord(index)));
            self.stats.generated += 1;
            if let Some(evicted) = self.store.put(Arc::clone(&chunk)) {
                let coord = evicted.coord();
                tracing::debug!(x = coord.x, y = coord.y, "evicted chunk");
                self.stats.evicted += 1;
            }
            *cell = Some(chunk);
        }

        self.window = cells.into_iter().flatten().collect();
        self.stats.loads += 1;

        let active = self.active_coord();
        tracing::debug!(
            x = active.x,
            y = active.y,
            total = self.store.len(),
            displayed = self.window.len(),
            "window loaded"
        );

        Ok(())
    }

    /// Shifts the focus one chunk in `direction` and reloads the window.
    ///
    /// # Errors
    ///
    /// Returns `OffGrid` without moving if the shifted window would leave
    /// the grid. Otherwise as [`World::load_chunks`].
    pub fn update_pos(&mut self, direction: Direction) -> TerrainResult<()> {
        let (dx, dy) = direction.delta();
        let next = self
            .focus
            .checked_offset(dx, dy)
            .filter(|next| next.fits_window(self.view_distance))
            .ok_or_else(|| self.off_grid())?;
        self.focus = next;
        self.load_chunks()
    }

    /// True if `point` (active-chunk local) is clear of placed objects.
    #[must_use]
    pub fn is_valid(&self, point: Vec3) -> bool {
        self.active_chunk().is_valid(point)
    }

    /// Bilinear terrain height at active-chunk local `(x, y)`.
    #[must_use]
    pub fn interpolate_height(&self, x: f64, y: f64) -> f64 {
        self.generator.interpolate_height(self.active_chunk(), x, y)
    }

    /// The chunk the player stands on.
    ///
    /// # Panics
    ///
    /// Only if called after a failed [`World::load_chunks`], which leaves
    /// the window empty.
    #[must_use]
    pub fn active_chunk(&self) -> &Chunk {
        let vd = self.view_distance as usize;
        &self.window[vd * self.side() + vd]
    }

    /// Grid coordinate of the active chunk, `focus + (vd, vd)`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn active_coord(&self) -> ChunkCoord {
        let vd = self.view_distance as i32;
        self.focus.offset(vd, vd)
    }

    /// Window chunks paired with their coordinates, in cell order.
    pub fn window(&self) -> impl ExactSizeIterator<Item = (ChunkCoord, &Chunk)> + '_ {
        self.window.iter().map(|chunk| (chunk.coord(), chunk.as_ref()))
    }

    /// World-space translation of a window chunk in the player-centred
    /// frame, where the active chunk's origin sits at `(0, 0)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn window_origin(&self, coord: ChunkCoord) -> (f32, f32) {
        let size = self.chunk_size() as f32;
        let vd = self.view_distance as f32;
        (
            size * (coord.x - self.focus.x) as f32 - vd * size,
            size * (coord.y - self.focus.y) as f32 - vd * size,
        )
    }

    /// Corner coordinate of the window.
    #[inline]
    #[must_use]
    pub const fn focus(&self) -> ChunkCoord {
        self.focus
    }

    /// Window radius in chunks.
    #[inline]
    #[must_use]
    pub const fn view_distance(&self) -> u32 {
        self.view_distance
    }

    /// Nominal chunk size in world units.
    #[inline]
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.generator.dims().width - 1
    }

    /// The generator that builds this world's chunks.
    #[inline]
    pub fn generator(&self) -> &ChunkGenerator<N> {
        &self.generator
    }

    /// The chunk store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Session counters.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> WorldStats {
        self.stats
    }

    #[inline]
    const fn off_grid(&self) -> TerrainError {
        TerrainError::OffGrid {
            x: self.focus.x,
            y: self.focus.y,
        }
    }

    const fn side(&self) -> usize {
        2 * self.view_distance as usize + 1
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    const fn cell_coord(&self, index: usize) -> ChunkCoord {
        let side = self.side();
        self.focus.offset((index / side) as i32, (index % side) as i32)
    }
}
