//! # Terrain Continuity Integration Test
//!
//! Proves neighbouring chunks meet without cracks and that a seed always
//! rebuilds the same landscape.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sylvan_procedural::{
    ChunkCoord, ChunkGenerator, ChunkStore, Direction, NoiseField, SimplexNoise, UnboundedStore, World,
    WorldSeed,
};

/// Wraps a field and counts every evaluation.
struct CountingField {
    inner: SimplexNoise,
    calls: Arc<AtomicUsize>,
}

impl NoiseField for CountingField {
    fn eval(&self, x: f64, y: f64) -> f64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.eval(x, y)
    }
}

/// Test: East neighbours share their boundary column exactly.
#[test]
fn test_east_seam_matches() {
    let gen = ChunkGenerator::from_seed(WorldSeed::new(42), 32);

    for (x, y) in [(0, 0), (-3, 5), (17, -9)] {
        let west = gen.generate(ChunkCoord::new(x, y));
        let east = gen.generate(ChunkCoord::new(x + 1, y));
        let last = west.dims().width - 1;

        for row in 0..west.dims().height {
            assert_eq!(
                west.height_at(last, row).unwrap(),
                east.height_at(0, row).unwrap(),
                "crack between ({x}, {y}) and ({}, {y}) at row {row}",
                x + 1
            );
        }
    }
}

/// Test: North neighbours share their boundary row exactly.
#[test]
fn test_north_seam_matches() {
    let gen = ChunkGenerator::from_seed(WorldSeed::new(7), 32);

    for (x, y) in [(0, 0), (4, -1), (-12, -12)] {
        let south = gen.generate(ChunkCoord::new(x, y));
        let north = gen.generate(ChunkCoord::new(x, y + 1));
        let last = south.dims().height - 1;

        for col in 0..south.dims().width {
            assert_eq!(south.height_at(col, last).unwrap(), north.height_at(col, 0).unwrap());
        }
    }
}

/// Test: Interpolating across the seam agrees from both sides.
#[test]
fn test_interpolation_continuous_across_seam() {
    let gen = ChunkGenerator::from_seed(WorldSeed::new(99), 16);
    let west = gen.generate(ChunkCoord::new(2, 2));
    let east = gen.generate(ChunkCoord::new(3, 2));

    for y in [0.0, 3.25, 8.5, 15.75] {
        let from_west = gen.interpolate_height(&west, 16.0, y);
        let from_east = gen.interpolate_height(&east, 0.0, y);
        assert!((from_west - from_east).abs() < 1e-9, "seam mismatch at y = {y}");
    }
}

/// Test: Same seed, same world, in any generation order.
#[test]
fn test_generation_order_does_not_matter() {
    let seed = WorldSeed::new(2024);
    let forward = ChunkGenerator::from_seed(seed, 16);
    let backward = ChunkGenerator::from_seed(seed, 16);

    let coords: Vec<_> = (-2..=2)
        .flat_map(|x| (-2..=2).map(move |y| ChunkCoord::new(x, y)))
        .collect();

    let a: Vec<_> = coords.iter().map(|c| forward.generate(*c)).collect();
    let b: Vec<_> = coords.iter().rev().map(|c| backward.generate(*c)).collect();

    for (chunk, twin) in a.iter().zip(b.iter().rev()) {
        assert_eq!(chunk.coord(), twin.coord());
        assert_eq!(chunk.heightmap(), twin.heightmap());
        assert_eq!(chunk.large_objects(), twin.large_objects());
        assert_eq!(chunk.small_objects(), twin.small_objects());
    }
}

/// Test: Heights stay within the vertical scale.
#[test]
fn test_heights_bounded_by_vertical_scale() {
    let gen = ChunkGenerator::from_seed(WorldSeed::new(5), 32).with_scales(0.02, 10.0);

    for x in -3..3 {
        let chunk = gen.generate(ChunkCoord::new(x, -x));
        assert!(chunk.heightmap().as_slice().iter().all(|h| h.abs() <= 10.0));
    }
}

/// Test: The heightmap pass samples the terrain field once per cell.
#[test]
fn test_terrain_field_sampled_once_per_cell() {
    let terrain_calls = Arc::new(AtomicUsize::new(0));
    let vegetation_calls = Arc::new(AtomicUsize::new(0));
    let seed = WorldSeed::new(3);

    let gen = ChunkGenerator::new(
        CountingField {
            inner: SimplexNoise::new(seed),
            calls: Arc::clone(&terrain_calls),
        },
        CountingField {
            inner: SimplexNoise::new(seed.vegetation()),
            calls: Arc::clone(&vegetation_calls),
        },
        seed,
        16,
    );

    let chunk = gen.generate(ChunkCoord::new(1, 1));
    assert_eq!(terrain_calls.load(Ordering::Relaxed), 17 * 17);

    // Two draws per trial, one field evaluation per draw
    let placer_trials = (17.0_f64 * 17.0 * 0.4 * 0.4).ceil() as usize;
    assert_eq!(vegetation_calls.load(Ordering::Relaxed), 2 * placer_trials);

    // Collision checks only read the cached objects
    let _ = chunk.is_valid(sylvan_shared::Vec3::new(3.0, 0.0, 3.0));
    assert_eq!(terrain_calls.load(Ordering::Relaxed), 17 * 17);
}

/// Test: A walk around a square loop generates each chunk exactly once.
///
/// The terrain field is sampled `(size + 1)^2` times per distinct chunk
/// ever shown, and the store only grows.
#[test]
fn test_world_generates_each_chunk_once() {
    let terrain_calls = Arc::new(AtomicUsize::new(0));
    let seed = WorldSeed::new(11);
    let gen = ChunkGenerator::new(
        CountingField {
            inner: SimplexNoise::new(seed),
            calls: Arc::clone(&terrain_calls),
        },
        CountingField {
            inner: SimplexNoise::new(seed.vegetation()),
            calls: Arc::new(AtomicUsize::new(0)),
        },
        seed,
        8,
    );
    let mut world = World::with_parts(gen, UnboundedStore::new(), ChunkCoord::new(0, 0), 1).unwrap();

    let mut shown: HashSet<ChunkCoord> = world.window().map(|(coord, _)| coord).collect();
    let mut stored = world.store().len();

    for direction in [
        Direction::East,
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::West,
        Direction::South,
    ] {
        world.update_pos(direction).unwrap();
        shown.extend(world.window().map(|(coord, _)| coord));

        assert!(world.store().len() >= stored, "store shrank after {direction:?}");
        stored = world.store().len();
        assert_eq!(stored, shown.len());
        assert_eq!(terrain_calls.load(Ordering::Relaxed), shown.len() * 9 * 9);
    }

    assert_eq!(world.focus(), ChunkCoord::new(0, 0));
    assert_eq!(shown.len(), 3 * 5 + 5);
    assert_eq!(world.stats().generated, shown.len() as u64);
}
