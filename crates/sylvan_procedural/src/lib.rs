//! # Sylvan Procedural Terrain
//!
//! Streams an unbounded, seeded landscape of square chunks around a
//! moving focus point.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same terrain
//! 2. **Chunked**: Each chunk is generated once and then only read
//! 3. **Seamless**: Neighbouring chunks share their boundary samples
//! 4. **Windowed**: Only the `(2 * vd + 1)^2` chunks around the focus are displayed
//!
//! ## Core Components
//!
//! - `SimplexNoise`: Seeded 2D noise behind every [`NoiseField`]
//! - `HeightmapGenerator`: Samples and interpolates terrain heights
//! - `ObjectPlacer`: Scatters trees and rocks by rejection sampling
//! - `ChunkGenerator`: Builds immutable chunks from both passes
//! - `World`: Chunk store plus display window around the focus
//!
//! ## Example
//!
//! ```rust,ignore
//! use sylvan_procedural::{Direction, World, WorldConfig};
//!
//! let mut world = World::new(&WorldConfig::default())?;
//! world.update_pos(Direction::East)?;
//!
//! let ground = world.interpolate_height(12.5, 40.25);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod heightmap;
pub mod mesh;
pub mod noise;
pub mod placement;
pub mod storage;
pub mod world;

pub use chunk::{Chunk, ChunkCoord, ChunkDims, ChunkGenerator, COLLISION_RADIUS};
pub use config::{StorePolicy, WorldConfig, MAX_VIEW_DISTANCE};
pub use error::{TerrainError, TerrainResult};
pub use heightmap::{Heightmap, HeightmapGenerator};
pub use mesh::{ObjectInstance, ObjectInstances, TerrainMesh, TerrainVertex};
pub use noise::{NoiseField, SimplexNoise, WorldSeed};
pub use placement::{ObjectPlacer, PlacedObjects, PlacementSeeding};
pub use storage::{ChunkStore, LruStore, UnboundedStore};
pub use world::{Direction, World, WorldStats};
