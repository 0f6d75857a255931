#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Duck Hunt headlessly and prints a summary.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use duck_hunt_catalog::LevelCatalog;
use duck_hunt_cli::{run_simulation, RunOutcome, SimulationReport, SimulationSettings};
use duck_hunt_core::{SuccessRatio, WELCOME_BANNER};
use duck_hunt_game::GameConfig;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "duck-hunt", about = "Plays Duck Hunt with a simulated shooter")]
struct Args {
    /// TOML level table replacing the built-in levels.
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,
    /// TOML game configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Fraction of a level's ducks required to pass, overriding the configuration.
    #[arg(long, value_name = "RATIO")]
    success_ratio: Option<f32>,
    /// Seed for duck placement and aim.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Shooter accuracy between 0 and 1.
    #[arg(long, default_value_t = 0.75)]
    accuracy: f32,
    /// Length of one simulated frame in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Frames after which the run is abandoned.
    #[arg(long, default_value_t = 250_000)]
    max_frames: u64,
    /// Automatic retries after a defeat.
    #[arg(long, default_value_t = 0)]
    retries: u32,
    /// Log engine decisions at debug level.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Duck Hunt command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = load_catalog(&args)?;
    let config = load_config(&args)?;
    let settings = SimulationSettings {
        seed: args.seed,
        accuracy: args.accuracy,
        frame_step: Duration::from_millis(args.frame_ms),
        max_frames: args.max_frames,
        retries: args.retries,
        ..SimulationSettings::default()
    };

    println!("{WELCOME_BANNER}");
    let report = run_simulation(catalog, config, &settings)?;
    print_summary(&report);
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        let _ = builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn load_catalog(args: &Args) -> Result<LevelCatalog> {
    match &args.levels {
        Some(path) => LevelCatalog::from_path(path)
            .with_context(|| format!("failed to load levels from {}", path.display())),
        None => LevelCatalog::builtin().context("built-in level table is invalid"),
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_toml_str(&contents)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Some(ratio) = args.success_ratio {
        let ratio = SuccessRatio::new(ratio)
            .with_context(|| format!("success ratio {ratio} must lie in (0, 1]"))?;
        config = config.with_success_ratio(ratio);
    }
    Ok(config)
}

fn print_summary(report: &SimulationReport) {
    let verdict = match report.outcome {
        RunOutcome::Victory => "You Win!",
        RunOutcome::Defeat => "You Lose!",
        RunOutcome::Unfinished => "Out of time",
    };
    println!("{verdict}");
    println!(
        "score {} | {} ducks shot with {} shots | {} frames | {} retries",
        report.state.score,
        report.ducks_shot,
        report.shots_fired,
        report.frames,
        report.retries_used
    );
    for stats in &report.history {
        println!(
            "  level {}: {}/{} ducks, {} escaped, {} shots",
            stats.level_id(),
            stats.ducks_killed(),
            stats.total_ducks(),
            stats.ducks_missed(),
            stats.shots_fired()
        );
    }
}
