//! # Chunk Storage
//!
//! The world keeps every generated chunk in a [`ChunkStore`]. Generation
//! logic only talks to the trait, so the retention policy can change
//! without touching it.
//!
//! - [`UnboundedStore`]: keeps everything for the session (default).
//! - [`LruStore`]: keeps at most `capacity` chunks, dropping the least
//!   recently used one when full.

use std::collections::HashMap;
use std::sync::Arc;

use crate::chunk::{Chunk, ChunkCoord};

/// Retention policy for generated chunks.
pub trait ChunkStore {
    /// Looks up a chunk. Lookups count as use for recency-based policies.
    fn get(&mut self, coord: ChunkCoord) -> Option<Arc<Chunk>>;

    /// Stores a chunk under its own coordinate.
    ///
    /// Returns a chunk the policy evicted to make room, if any.
    fn put(&mut self, chunk: Arc<Chunk>) -> Option<Arc<Chunk>>;

    /// True if a chunk is stored at `coord`. Does not count as use.
    fn contains(&self, coord: ChunkCoord) -> bool;

    /// Number of stored chunks.
    fn len(&self) -> usize;

    /// True if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: ChunkStore + ?Sized> ChunkStore for Box<S> {
    fn get(&mut self, coord: ChunkCoord) -> Option<Arc<Chunk>> {
        (**self).get(coord)
    }

    fn put(&mut self, chunk: Arc<Chunk>) -> Option<Arc<Chunk>> {
        (**self).put(chunk)
    }

    fn contains(&self, coord: ChunkCoord) -> bool {
        (**self).contains(coord)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Keeps every chunk ever stored. Never evicts.
#[derive(Default)]
pub struct UnboundedStore {
    chunks: HashMap<ChunkCoord, Arc<Chunk>>,
}

impl UnboundedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChunkStore for UnboundedStore {
    fn get(&mut self, coord: ChunkCoord) -> Option<Arc<Chunk>> {
        self.chunks.get(&coord).cloned()
    }

    fn put(&mut self, chunk: Arc<Chunk>) -> Option<Arc<Chunk>> {
        self.chunks.insert(chunk.coord(), chunk);
        None
    }

    fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }
}

/// Bounded store with least-recently-used eviction.
pub struct LruStore {
    capacity: usize,
    clock: u64,
    chunks: HashMap<ChunkCoord, (Arc<Chunk>, u64)>,
}

impl LruStore {
    /// Creates a store holding at most `capacity` chunks (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            clock: 0,
            chunks: HashMap::with_capacity(capacity + 1),
        }
    }

    /// Maximum number of chunks retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl ChunkStore for LruStore {
    fn get(&mut self, coord: ChunkCoord) -> Option<Arc<Chunk>> {
        let now = self.tick();
        self.chunks.get_mut(&coord).map(|(chunk, used)| {
            *used = now;
            Arc::clone(chunk)
        })
    }

    fn put(&mut self, chunk: Arc<Chunk>) -> Option<Arc<Chunk>> {
        let now = self.tick();
        self.chunks.insert(chunk.coord(), (chunk, now));

        if self.chunks.len() <= self.capacity {
            return None;
        }

        let oldest = self
            .chunks
            .iter()
            .min_by_key(|(_, (_, used))| *used)
            .map(|(coord, _)| *coord)?;
        self.chunks.remove(&oldest).map(|(chunk, _)| chunk)
    }

    fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    fn len(&self) -> usize {
        self.chunks.len()
    }
}
