//! Moon phase command line tool.
//!
//! Computes the moon snapshot for a location and prints it.
//!
//! # Usage
//!
//! ```bash
//! # Location from moon_phase.toml, current time
//! moon-phase
//!
//! # Explicit location and instant, UTC output, JSON
//! moon-phase --latitude 0 --longitude 0 --at 2024-01-11T11:57:00Z --utc --format json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter, overrides `-v`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use qtty::angular::Degrees;
use tracing_subscriber::EnvFilter;

use moon_phase::config::MoonPhaseConfig;
use moon_phase::services::{MoonPhaseSensor, SENSOR_NAME};
use moon_phase::time::OutputZone;

/// Moon phase, illumination, rise/set and upcoming phases for a location.
#[derive(Parser)]
#[command(name = "moon-phase", version, about)]
struct Cli {
    /// Path to TOML configuration file (default: search moon_phase.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override observer latitude in degrees (north positive).
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Override observer longitude in degrees (east positive).
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Evaluation instant as RFC 3339 (default: now).
    #[arg(long)]
    at: Option<String>,

    /// Report timestamps in UTC regardless of configuration.
    #[arg(long)]
    utc: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Attributes)]
    format: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Snapshot as JSON
    Json,
    /// State, icon and attributes, one per line
    Attributes,
}

/// Install the fmt subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("moon_phase={level}")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(cli: &Cli) -> Result<MoonPhaseConfig> {
    let mut config = match (&cli.config, cli.latitude, cli.longitude) {
        (Some(path), _, _) => MoonPhaseConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        (None, Some(latitude), Some(longitude)) => MoonPhaseConfig::new(latitude, longitude),
        (None, _, _) => MoonPhaseConfig::from_default_location()
            .context("No location given; pass --latitude/--longitude or --config")?,
    };

    if let Some(latitude) = cli.latitude {
        config.observer.latitude = latitude;
    }
    if let Some(longitude) = cli.longitude {
        config.observer.longitude = longitude;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn parse_instant(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --at instant '{}'", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let zone = if cli.utc {
        OutputZone::utc()
    } else {
        config.zone()?
    };
    let instant = parse_instant(cli.at.as_deref())?;
    log::info!(
        "Computing moon phase at ({}, {}) for {} (zone {})",
        config.observer.latitude,
        config.observer.longitude,
        instant,
        zone
    );

    let mut sensor = MoonPhaseSensor::with_default_ephemeris(
        Degrees::new(config.observer.latitude),
        Degrees::new(config.observer.longitude),
        zone,
    );
    let snapshot = sensor
        .update(instant)
        .context("Failed to resolve the Moon for this location and instant")?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        OutputFormat::Attributes => {
            println!("{}: {}", SENSOR_NAME, snapshot.state());
            println!("icon: {}", snapshot.icon());
            for (key, value) in snapshot.attributes() {
                println!("{}: {}", key, value);
            }
        }
    }

    Ok(())
}
