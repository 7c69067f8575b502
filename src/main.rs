use anyhow::Result;
use clap::Parser;
use grid_snake::input::ControlScheme;
use grid_snake::logging::{self, LogLevel};
use grid_snake::modes::HumanMode;
use grid_snake::settings::{Overrides, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Single-player Snake in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width and height
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seconds between ticks (0.1 - 1.0)
    #[arg(long)]
    speed: Option<f64>,

    /// Direction table for the on-screen buttons
    #[arg(long, value_enum)]
    controls: Option<ControlScheme>,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref(), cli.log_level)?;

    let overrides = Overrides {
        grid_size: cli.grid_size,
        tick_interval_secs: cli.speed,
        control_scheme: cli.controls,
        seed: cli.seed,
    };
    let settings = Settings::resolve(cli.config.as_deref(), overrides)?;

    let mut human_mode = HumanMode::new(&settings);
    human_mode.run().await?;

    Ok(())
}
