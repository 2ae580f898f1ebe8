//! # STRATUM Chunk Generator
//!
//! Generates a square of chunks around the origin and logs a summary of
//! each one.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug stratum_gen crates/stratum/config/world.toml 2
//! ```
//!
//! `radius` defaults to 1, which generates the 3x3 chunks around (0, 0).

use std::process::ExitCode;

use stratum::{ChunkSummary, ConfigError, World, WorldConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_RADIUS: i32 = 1;

fn usage() {
    eprintln!("Usage: stratum_gen <config.toml> [radius]");
    eprintln!();
    eprintln!("  config.toml   world configuration");
    eprintln!("  radius        chunks generated on each side of the origin (default: {DEFAULT_RADIUS})");
}

fn run(config_path: &str, radius: i32) -> Result<(), ConfigError> {
    let config = WorldConfig::load(config_path)?;
    let world = World::from_config(&config)?;

    let mut grid = stratum_core::VoxelGrid::new(world.shape());
    let mut total = ChunkSummary::default();
    let mut chunks = 0usize;
    for chunk_z in -radius..=radius {
        for chunk_x in -radius..=radius {
            world.generate_into(&mut grid, chunk_x, chunk_z)?;
            let summary = world.summarize(&grid, chunk_x, chunk_z);
            tracing::info!(
                chunk_x,
                chunk_z,
                solid = summary.solid,
                water = summary.water,
                air = summary.air,
                min_height = ?summary.min_height,
                max_height = ?summary.max_height,
                "chunk generated"
            );
            total.solid += summary.solid;
            total.water += summary.water;
            total.air += summary.air;
            total.min_height = match (total.min_height, summary.min_height) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            total.max_height = total.max_height.max(summary.max_height);
            chunks += 1;
        }
    }

    tracing::info!(
        generator = world.generator_key(),
        chunks,
        solid = total.solid,
        water = total.water,
        air = total.air,
        min_height = ?total.min_height,
        max_height = ?total.max_height,
        "generation complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return ExitCode::SUCCESS;
    }
    let Some(config_path) = args.get(1) else {
        usage();
        return ExitCode::FAILURE;
    };
    let radius = match args.get(2).map(|r| r.parse::<i32>()) {
        None => DEFAULT_RADIUS,
        Some(Ok(radius)) if radius >= 0 => radius,
        Some(_) => {
            tracing::error!(radius = %args[2], "radius must be a non-negative integer");
            return ExitCode::FAILURE;
        }
    };

    match run(config_path, radius) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "stratum_gen failed");
            ExitCode::FAILURE
        }
    }
}
