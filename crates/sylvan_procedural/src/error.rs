//! # Terrain Error Types
//!
//! All errors that can occur while configuring or querying the terrain.

use thiserror::Error;

/// Errors that can occur in the terrain system.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// View distance at or above the hard limit. Fatal for a world.
    #[error("view distance {requested} exceeds the hard limit (must be below {max})")]
    ViewDistanceTooLarge {
        /// The configured view distance.
        requested: u32,
        /// The exclusive upper bound.
        max: u32,
    },

    /// Heightmap access outside the sample grid.
    #[error("heightmap index ({row}, {col}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid width in samples.
        width: usize,
        /// Grid height in samples.
        height: usize,
    },

    /// The window would reach past `i32` chunk coordinates.
    #[error("window at focus ({x}, {y}) reaches the edge of the chunk grid")]
    OffGrid {
        /// Focus on the primary axis.
        x: i32,
        /// Focus on the secondary axis.
        y: i32,
    },

    /// Configuration values that cannot produce a world.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid TOML for `WorldConfig`.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
