use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use parking_sim::simulation::{LogIndicator, LogStatsDisplay, ParkingConfig, ParkingWorld};

#[derive(Parser)]
#[command(name = "parking_sim")]
#[command(about = "Headless parking lot simulation")]
struct Cli {
    /// RON configuration file; a demo lot is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Seed for reproducible spawn positions
    #[arg(long)]
    seed: Option<u64>,

    /// Override the vehicle pool size
    #[arg(long)]
    max_cars: Option<usize>,

    /// Override the seconds between spawn attempts
    #[arg(long)]
    spawn_interval: Option<f32>,

    /// Override how long vehicles stay parked
    #[arg(long)]
    dwell_time: Option<f32>,

    /// Print a full summary every N simulated seconds (0 disables)
    #[arg(long, default_value = "0")]
    summary_every: u32,
}

impl Cli {
    fn build_config(&self) -> Result<ParkingConfig> {
        let mut config = match &self.config {
            Some(path) => ParkingConfig::load(path)?,
            None => ParkingWorld::demo_config(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_cars) = self.max_cars {
            config.max_cars = max_cars;
        }
        if let Some(spawn_interval) = self.spawn_interval {
            config.spawn_interval = spawn_interval;
        }
        if let Some(dwell_time) = self.dwell_time {
            config.dwell_time = dwell_time;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,parking_sim=info"),
    )
    .init();

    let cli = Cli::parse();
    if cli.delta.is_nan() || cli.delta <= 0.0 {
        anyhow::bail!("--delta must be positive");
    }

    let config = cli.build_config()?;
    run_headless(&cli, &config)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: &ParkingConfig) -> Result<()> {
    println!("Running parking simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s", cli.ticks, cli.delta);
    println!(
        "Spots: {}, Max cars: {}, Spawn interval: {}s, Dwell time: {}s",
        config.spots.len(),
        config.max_cars,
        config.spawn_interval,
        config.dwell_time
    );
    println!();

    let mut world = ParkingWorld::with_collaborators(
        config,
        Some(Box::new(LogIndicator)),
        Some(Box::new(LogStatsDisplay)),
    )?;

    println!("Initial state:");
    world.print_summary();
    println!();

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / cli.delta).ceil() as u32;
    let summary_ticks = ticks_per_second.saturating_mul(cli.summary_every);

    for tick in 1..=cli.ticks {
        world.tick(cli.delta);

        if summary_ticks > 0 && tick % summary_ticks == 0 {
            println!(
                "--- After tick {} ({:.1}s simulated time) ---",
                tick,
                tick as f32 * cli.delta
            );
            world.print_summary();
            println!();
        }
    }

    world.shutdown();

    println!("=== Final State ===");
    world.print_summary();
    world.log_final_stats();
    Ok(())
}
