//! # World Configuration
//!
//! Everything a world needs is supplied once, at startup, usually from a
//! TOML file:
//!
//! ```toml
//! chunk_size = 64
//! view_distance = 2
//! seed = 1234
//! density = 0.4
//! placement_seeding = "world"
//!
//! [store]
//! policy = "lru"
//! capacity = 400
//! ```
//!
//! There is no runtime reconfiguration path.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chunk::ChunkCoord;
use crate::error::{TerrainError, TerrainResult};
use crate::heightmap::{DEFAULT_HORIZONTAL_SCALE, DEFAULT_VERTICAL_SCALE};
use crate::noise::WorldSeed;
use crate::placement::{PlacementSeeding, DEFAULT_DENSITY};

/// View distance at or above which a world refuses to start.
pub const MAX_VIEW_DISTANCE: u32 = 50;

/// Default nominal chunk size (world units per side).
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// Default view distance (chunks in each direction).
pub const DEFAULT_VIEW_DISTANCE: u32 = 2;

/// Chunk retention policy selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum StorePolicy {
    /// Keep every generated chunk for the session.
    #[default]
    Unbounded,
    /// Keep at most `capacity` chunks, least recently used evicted first.
    Lru {
        /// Maximum chunks retained. Must cover the display window.
        capacity: usize,
    },
}

/// Startup configuration for a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Nominal chunk size; heightmaps hold `chunk_size + 1` samples per side.
    pub chunk_size: usize,
    /// Window radius in chunks.
    pub view_distance: u32,
    /// World generation seed.
    pub seed: WorldSeed,
    /// Object placement density factor.
    pub density: f64,
    /// Horizontal noise scale.
    pub horizontal_scale: f64,
    /// Vertical height scale (world units).
    pub vertical_scale: f64,
    /// How placement randomness is seeded.
    pub placement_seeding: PlacementSeeding,
    /// Chunk retention policy.
    pub store: StorePolicy,
    /// Initial focus (window corner) coordinate.
    pub start: ChunkCoord,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            view_distance: DEFAULT_VIEW_DISTANCE,
            seed: WorldSeed::default(),
            density: DEFAULT_DENSITY,
            horizontal_scale: DEFAULT_HORIZONTAL_SCALE,
            vertical_scale: DEFAULT_VERTICAL_SCALE,
            placement_seeding: PlacementSeeding::default(),
            store: StorePolicy::default(),
            start: ChunkCoord::default(),
        }
    }
}

impl WorldConfig {
    /// Small, fast configuration for tests.
    #[must_use]
    pub fn test() -> Self {
        Self {
            chunk_size: 16,
            view_distance: 1,
            seed: WorldSeed::new(42),
            ..Self::default()
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` for malformed TOML and `InvalidConfig` or
    /// `ViewDistanceTooLarge` for values that fail [`WorldConfig::validate`].
    pub fn from_toml_str(text: &str) -> TerrainResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigIo` if the file cannot be read, otherwise as
    /// [`WorldConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Number of chunks in the display window, `(2 * vd + 1)^2`.
    #[must_use]
    pub const fn window_len(&self) -> usize {
        let side = 2 * self.view_distance as usize + 1;
        side * side
    }

    /// Checks that the configuration can produce a world.
    ///
    /// # Errors
    ///
    /// - `ViewDistanceTooLarge` if `view_distance >= MAX_VIEW_DISTANCE`
    /// - `InvalidConfig` for a zero chunk size, non-finite or negative
    ///   density, non-finite scales, or an LRU capacity below the window size
    pub fn validate(&self) -> TerrainResult<()> {
        if self.view_distance >= MAX_VIEW_DISTANCE {
            return Err(TerrainError::ViewDistanceTooLarge {
                requested: self.view_distance,
                max: MAX_VIEW_DISTANCE,
            });
        }
        if !self.start.fits_window(self.view_distance) {
            return Err(TerrainError::InvalidConfig(format!(
                "start ({}, {}) puts the {}-chunk-wide window past the i32 grid",
                self.start.x,
                self.start.y,
                2 * self.view_distance + 1
            )));
        }
        if self.chunk_size == 0 {
            return Err(TerrainError::InvalidConfig("chunk_size must be at least 1".into()));
        }
        if !self.density.is_finite() || self.density < 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "density must be a finite, non-negative number (got {})",
                self.density
            )));
        }
        if !self.horizontal_scale.is_finite() || !self.vertical_scale.is_finite() {
            return Err(TerrainError::InvalidConfig("noise scales must be finite".into()));
        }
        if let StorePolicy::Lru { capacity } = self.store {
            if capacity < self.window_len() {
                return Err(TerrainError::InvalidConfig(format!(
                    "lru capacity {capacity} cannot hold the {} chunk window",
                    self.window_len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.chunk_size, 64);
        assert_eq!(config.view_distance, 2);
        assert_eq!(config.window_len(), 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = WorldConfig::from_toml_str(
            r#"
            chunk_size = 32
            view_distance = 3
            seed = 1234
            density = 0.5
            placement_seeding = "entropy"
            start = { x = -4, y = 9 }

            [store]
            policy = "lru"
            capacity = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.chunk_size, 32);
        assert_eq!(config.seed, WorldSeed::new(1234));
        assert_eq!(config.placement_seeding, PlacementSeeding::Entropy);
        assert_eq!(config.store, StorePolicy::Lru { capacity: 100 });
        assert_eq!(config.start, ChunkCoord::new(-4, 9));
        assert_eq!(config.horizontal_scale, DEFAULT_HORIZONTAL_SCALE);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(WorldConfig::from_toml_str("").unwrap(), WorldConfig::default());
    }

    #[test]
    fn test_view_distance_limit() {
        let err = WorldConfig::from_toml_str("view_distance = 50").unwrap_err();
        assert!(matches!(
            err,
            TerrainError::ViewDistanceTooLarge { requested: 50, max: 50 }
        ));
        assert!(WorldConfig::from_toml_str("view_distance = 49").is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            WorldConfig::from_toml_str("chunk_size = 0"),
            Err(TerrainError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("density = -0.1"),
            Err(TerrainError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("view_distance = 1\n[store]\npolicy = \"lru\"\ncapacity = 8"),
            Err(TerrainError::InvalidConfig(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("chunk_size = \"big\""),
            Err(TerrainError::ConfigParse(_))
        ));
        assert!(matches!(
            WorldConfig::from_toml_str("view_range = 3"),
            Err(TerrainError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_rejects_start_at_grid_edge() {
        let config = WorldConfig {
            start: ChunkCoord::new(i32::MAX - 1, 0),
            view_distance: 1,
            ..WorldConfig::test()
        };
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));

        let fits = WorldConfig {
            start: ChunkCoord::new(i32::MAX - 2, i32::MIN),
            ..config
        };
        assert!(fits.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("sylvan_no_such_world.toml");
        assert!(matches!(WorldConfig::load(&path), Err(TerrainError::ConfigIo(_))));
    }
}
