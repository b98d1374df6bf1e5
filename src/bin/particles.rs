use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use pointer_particles::{ParticleField, PointerTracker, SimulationConfig, Viewport};
use rand::prelude::*;

/// Run the particle field without a window, with the pointer orbiting the
/// viewport centre.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value_t = 600)]
    frames: u32,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Seed for a reproducible particle set.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Log field statistics every this many frames.
    #[arg(long, default_value_t = 60)]
    report_every: u32,

    /// Radius of the pointer orbit as a fraction of the smaller viewport side.
    #[arg(long, default_value_t = 0.3)]
    orbit: f32,
}

fn main() -> Result<()> {
    let _logger = pointer_particles::logging::setup()?;
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("Unable to load {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let viewport = Viewport::new(args.width, args.height);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut field = ParticleField::create_with_rng(config, viewport, &mut rng)
        .context("Invalid particle configuration")?;

    let mut pointer = PointerTracker::new(viewport);
    let (cx, cy) = viewport.center();
    let radius = viewport.width.min(viewport.height) * args.orbit;

    log::info!(
        "Running {} frames with {} particles in a {}x{} viewport",
        args.frames,
        field.len(),
        viewport.width,
        viewport.height
    );

    let start = Instant::now();
    for frame in 1..=args.frames {
        let angle = frame as f32 * 0.02;
        pointer.move_to(cx + radius * angle.cos(), cy + radius * angle.sin());
        field.tick(pointer.state(), viewport);

        if args.report_every > 0 && frame % args.report_every == 0 {
            let stats = field.stats(pointer.state());
            log::info!(
                "frame={} attracted={} mean_distance={:.1} mean_speed={:.3}",
                frame,
                stats.attracted,
                stats.mean_distance,
                stats.mean_speed
            );
        }
    }

    let elapsed = start.elapsed();
    log::info!(
        "Done. {} frames in {:?} ({:?} per frame)",
        args.frames,
        elapsed,
        elapsed / args.frames.max(1)
    );

    Ok(())
}
