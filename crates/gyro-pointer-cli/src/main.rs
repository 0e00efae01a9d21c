//! gyro-pointer command line tool
//!
//! Offline front end for the pointer pipeline: replay recorded sensor streams,
//! evaluate a single orientation, inspect the venue, and aim fixtures.
//!
//! Usage:
//!   gyro-pointer replay session.jsonl
//!   gyro-pointer point --alpha 90 --beta 10 --gamma 0
//!   gyro-pointer --config venue.toml venue
//!   gyro-pointer fixture --fixture 5,9,3.5 --target 5,5,1

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gyro_pointer_config::AppConfig;
use gyro_pointer_spatial::{Mounting, Vector3D};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gyro-pointer")]
#[command(about = "Turn phone orientation into a calibrated pointer inside a venue")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to the per-user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a JSON-lines file of client messages through a session
    Replay {
        /// File with one client message per line
        file: PathBuf,

        /// Use the latest sample instead of interpolating
        #[arg(long)]
        no_interpolation: bool,

        /// Override the latency buffer size
        #[arg(long)]
        buffer_size: Option<usize>,
    },

    /// Evaluate one orientation, optionally after calibrating
    Point {
        #[arg(long, allow_hyphen_values = true)]
        alpha: f64,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        beta: f64,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        gamma: f64,

        /// Calibrate first with this yaw
        #[arg(long, allow_hyphen_values = true)]
        calibrate_alpha: Option<f64>,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        calibrate_beta: f64,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        calibrate_gamma: f64,
    },

    /// Print the configured venue
    Venue,

    /// Compute pan/tilt for a moving-head fixture
    Fixture {
        /// Fixture position as x,y,z
        #[arg(long, value_parser = commands::parse_point, allow_hyphen_values = true)]
        fixture: Vector3D,

        /// Target position as x,y,z
        #[arg(long, value_parser = commands::parse_point, allow_hyphen_values = true)]
        target: Vector3D,

        /// ceiling, floor or wall
        #[arg(long, default_value = "ceiling")]
        mounting: Mounting,

        #[arg(long)]
        pan_invert: bool,

        #[arg(long)]
        tilt_invert: bool,
    },
}

fn init_tracing(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    // stdout is reserved for protocol JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Replay {
            file,
            no_interpolation,
            buffer_size,
        } => {
            if no_interpolation {
                config.buffer.interpolate = false;
            }
            if let Some(size) = buffer_size {
                config.buffer.capacity = size;
            }
            let stdout = std::io::stdout();
            commands::replay(&config, &file, &mut stdout.lock())?;
        }
        Commands::Point {
            alpha,
            beta,
            gamma,
            calibrate_alpha,
            calibrate_beta,
            calibrate_gamma,
        } => {
            let calibration = calibrate_alpha.map(|a| (a, calibrate_beta, calibrate_gamma));
            let stdout = std::io::stdout();
            commands::point(&config, (alpha, beta, gamma), calibration, &mut stdout.lock())?;
        }
        Commands::Venue => {
            let stdout = std::io::stdout();
            commands::venue(&config, &mut stdout.lock())?;
        }
        Commands::Fixture {
            fixture,
            target,
            mounting,
            pan_invert,
            tilt_invert,
        } => {
            let stdout = std::io::stdout();
            commands::fixture(
                fixture,
                target,
                mounting,
                pan_invert,
                tilt_invert,
                &mut stdout.lock(),
            )?;
        }
    }

    Ok(())
}
