use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lightcone::{App, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightcone", about = "Volumetric light cone in a particle haze")]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of haze particles
    #[arg(long)]
    particles: Option<u32>,

    /// Animation speed (0.0 - 1.0)
    #[arg(long)]
    speed: Option<f32>,

    /// Start with pointer-controlled camera instead of the orbit
    #[arg(long)]
    no_auto_rotate: bool,

    /// RNG seed for particle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Step the animation this many frames without a window, then exit
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(count) = cli.particles {
        config = config.with_particle_count(count);
    }
    if let Some(speed) = cli.speed {
        config = config.with_animation_speed(speed);
    }
    if cli.no_auto_rotate {
        config = config.with_auto_rotate(false);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate().context("invalid configuration")?;

    if let Some(ticks) = cli.headless {
        let mut app = App::new(&config)?;
        let report = app.run_ticks(ticks);
        let camera = app.scene.camera.position;
        tracing::info!(
            ticks,
            time = report.time,
            recycled = report.recycled,
            camera = ?camera,
            "headless run finished"
        );
        return Ok(());
    }

    tracing::info!("lightcone starting");
    lightcone::run(config)?;
    tracing::info!("lightcone exited");
    Ok(())
}
