//! # Heightmaps
//!
//! Each chunk owns a dense grid of height samples, one more than the nominal
//! chunk size on each axis so that neighbours share their seam row/column.
//!
//! ## Global Sampling
//!
//! Local sample `(i, j)` of the chunk at grid offset `(ox, oy)` maps to the
//! noise coordinate
//!
//! ```text
//! gx = horizontal_scale * (ox * width  + i - ox)
//! gy = horizontal_scale * (oy * height + j - oy)
//! ```
//!
//! which is `ox * size + i` with `size = width - 1`: the last column of one
//! chunk and the first column of its east neighbour land on the same noise
//! coordinate and therefore on the same height.

use crate::chunk::{ChunkCoord, ChunkDims};
use crate::error::{TerrainError, TerrainResult};
use crate::noise::NoiseField;

/// Default horizontal scale applied to global sample coordinates.
pub const DEFAULT_HORIZONTAL_SCALE: f64 = 0.0125;

/// Default vertical scale applied to noise values (world units).
pub const DEFAULT_VERTICAL_SCALE: f64 = 32.0;

/// Bounds-checked height grid, stored row-major as `row * width + col`.
///
/// The layout is the vertex order renderers expect, so [`Heightmap::as_slice`]
/// can be streamed directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    samples: Box<[f64]>,
}

impl Heightmap {
    /// Builds a heightmap by evaluating `f(col, row)` for every sample.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut samples = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                samples.push(f(col, row));
            }
        }

        Self {
            width,
            height,
            samples: samples.into_boxed_slice(),
        }
    }

    /// Width in samples (columns).
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in samples (rows).
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the sample at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfBounds`] if either index is outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> TerrainResult<f64> {
        if row < self.height && col < self.width {
            Ok(self.samples[row * self.width + col])
        } else {
            Err(TerrainError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// All samples in row-major order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Iterates rows from `row = 0` upward.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.samples.chunks_exact(self.width.max(1))
    }
}

/// Derives heights from the terrain noise field.
///
/// Pure function of `(offset, dims, field)`: the same inputs always produce
/// the same heights.
pub struct HeightmapGenerator<N> {
    field: N,
    horizontal_scale: f64,
    vertical_scale: f64,
}

impl<N: NoiseField> HeightmapGenerator<N> {
    /// Creates a generator with the default scales.
    #[must_use]
    pub fn new(field: N) -> Self {
        Self {
            field,
            horizontal_scale: DEFAULT_HORIZONTAL_SCALE,
            vertical_scale: DEFAULT_VERTICAL_SCALE,
        }
    }

    /// Overrides the horizontal and vertical scales.
    #[must_use]
    pub fn with_scales(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_scale = horizontal;
        self.vertical_scale = vertical;
        self
    }

    /// The terrain field this generator samples.
    #[inline]
    pub fn field(&self) -> &N {
        &self.field
    }

    /// Height at local coordinate `(i, j)` of the chunk at `coord`.
    ///
    /// Valid for any real `(i, j)`, including coordinates outside the
    /// chunk's cached grid.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, coord: ChunkCoord, dims: ChunkDims, i: f64, j: f64) -> f64 {
        let ox = f64::from(coord.x);
        let oy = f64::from(coord.y);
        let gx = self.horizontal_scale * (ox * dims.width as f64 + i - ox);
        let gy = self.horizontal_scale * (oy * dims.height as f64 + j - oy);
        self.vertical_scale * self.field.eval(gx, gy)
    }

    /// Builds the full heightmap for one chunk.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(&self, coord: ChunkCoord, dims: ChunkDims) -> Heightmap {
        Heightmap::from_fn(dims.width, dims.height, |col, row| {
            self.sample(coord, dims, col as f64, row as f64)
        })
    }

    /// Bilinear height at real local coordinates.
    ///
    /// The four corners are re-derived from the noise field rather than read
    /// from the cached grid, so this also works past the chunk edge. Steep
    /// slopes come out slightly wrong; a triangulated lookup would fix that
    /// at a higher cost.
    #[must_use]
    pub fn interpolate(&self, coord: ChunkCoord, dims: ChunkDims, x: f64, y: f64) -> f64 {
        let x1 = x.floor();
        let y1 = y.floor();
        let x2 = x.ceil();
        let y2 = y.ceil();

        // Fractions from the floor corner; an integer coordinate puts all
        // the weight on that corner.
        let tx = x - x1;
        let ty = y - y1;

        let near = (1.0 - tx) * self.sample(coord, dims, x1, y1) + tx * self.sample(coord, dims, x2, y1);
        let far = (1.0 - tx) * self.sample(coord, dims, x1, y2) + tx * self.sample(coord, dims, x2, y2);
        (1.0 - ty) * near + ty * far
    }
}
