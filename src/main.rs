use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use particle_arena::{headless, logging, window, SeededCoin, SimConfig, Simulation};

#[derive(Parser, Debug)]
#[command(about = "Last-particle-standing point simulation")]
struct Args {
    /// Number of particles to spawn
    count: Option<usize>,

    /// JSON file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed spawning and collision coin flips for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many frames without a window
    #[arg(long)]
    headless: Option<u64>,

    /// Fixed time step; headless runs always use it
    #[arg(long)]
    dt: Option<f32>,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(count) = args.count {
        config.particle_count = count;
    }
    Ok(config)
}

fn build_simulation(args: &Args, config: SimConfig) -> Simulation {
    match args.seed {
        Some(seed) => {
            let mut rng = SmallRng::seed_from_u64(seed);
            Simulation::with_rng(config, &mut rng).with_coin(SeededCoin::new(seed))
        }
        None => Simulation::new(config),
    }
}

fn main() -> Result<()> {
    let _logger = logging::setup().context("starting logger")?;
    let args = Args::parse();

    let config = load_config(&args)?;
    let mut sim = build_simulation(&args, config);

    if let Some(frames) = args.headless {
        headless::run(&mut sim, frames, args.dt.unwrap_or(0.016));
        return Ok(());
    }

    println!("Press ESC to quit, SPACE to grow the particles, P to pause");
    let app = window::App::new(sim).with_fixed_delta(args.dt);
    window::run(app).context("running arena window")?;
    Ok(())
}
