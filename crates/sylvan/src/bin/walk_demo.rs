//! # Sylvan Walk Demo
//!
//! Headless walk through a streamed forest. Loads a world configuration,
//! walks a square loop one step per frame and prints what the streamer did.
//!
//! ```bash
//! # Default configuration
//! cargo run --bin walk_demo
//!
//! # Custom configuration and frame count
//! cargo run --bin walk_demo -- my_world.toml 4000
//! ```
//!
//! A view distance of 50 or more is refused with a non-zero exit status.

use std::process;
use std::time::Instant;

use sylvan::{ViewFlags, Walker};
use sylvan_procedural::mesh::TerrainMesh;
use sylvan_procedural::{ChunkStore, World, WorldConfig};
use sylvan_shared::Vec3;

const DEFAULT_CONFIG: &str = "data/world.toml";
const DEFAULT_FRAMES: usize = 2000;

/// Distance covered per frame (world units).
const STEP: f32 = 0.5;

/// Frames per leg of the square loop.
const LEG: usize = 500;

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let frames = match args.next().map(|arg| arg.parse::<usize>()) {
        None => DEFAULT_FRAMES,
        Some(Ok(frames)) => frames,
        Some(Err(e)) => {
            eprintln!("walk_demo: invalid frame count: {e}");
            process::exit(2);
        }
    };

    let config = match WorldConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("walk_demo: {path}: {e}");
            process::exit(1);
        }
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                       SYLVAN WALK DEMO");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  config:        {path}");
    println!("  seed:          {}", config.seed.value());
    println!("  chunk size:    {}", config.chunk_size);
    println!("  view distance: {}", config.view_distance);
    println!("  store:         {:?}", config.store);
    println!();

    let start = Instant::now();
    let mut world = match World::new(&config) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("walk_demo: {e}");
            process::exit(1);
        }
    };
    println!("Initial window: {} chunks in {:?}", world.window().len(), start.elapsed());

    let flags = ViewFlags::default();
    let mut walker = Walker::spawn(&world);
    let mut blocked = 0usize;

    let legs = [
        Vec3::new(STEP, 0.0, 0.0),
        Vec3::new(0.0, 0.0, STEP),
        Vec3::new(-STEP, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -STEP),
    ];

    let start = Instant::now();
    for frame in 0..frames {
        let heading = legs[(frame / LEG) % legs.len()];
        if !walker.try_move(&world, heading, &flags) {
            // Sidestep around the obstacle
            let side = Vec3::new(heading.z, 0.0, -heading.x);
            if !walker.try_move(&world, side, &flags) {
                blocked += 1;
            }
        }

        if let Err(e) = walker.settle(&mut world, &flags) {
            eprintln!("walk_demo: {e}");
            process::exit(1);
        }
    }
    let elapsed = start.elapsed();

    let stats = world.stats();
    let active = world.active_chunk();
    let mesh = TerrainMesh::from_chunk(active);
    let pos = walker.position();

    println!();
    println!("=== Walk Summary ===");
    println!("Frames:          {frames} in {elapsed:?}");
    println!("Blocked frames:  {blocked}");
    println!("Active chunk:    ({}, {})", world.active_coord().x, world.active_coord().y);
    println!("Local position:  ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z);
    println!("Window loads:    {}", stats.loads);
    println!("Generated:       {}", stats.generated);
    println!("Reused:          {}", stats.reused);
    println!("Evicted:         {}", stats.evicted);
    println!("Stored chunks:   {}", world.store().len());
    println!(
        "Active objects:  {} trees, {} rocks",
        active.large_objects().len(),
        active.small_objects().len()
    );
    println!(
        "Active mesh:     {} vertices, {} strips, {} bytes",
        mesh.vertices().len(),
        mesh.strip_count(),
        mesh.vertex_bytes().len()
    );
    println!("====================");
}
