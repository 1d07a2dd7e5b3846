//! Moon phase calculator.
//!
//! Given an observer location and a UTC instant, computes the Moon's phase
//! label, illuminated fraction, elongation, distance, altitude, the next full
//! and new moons, today's moonrise and moonset, and the Moon's age.
//!
//! # Modules
//!
//! - [`ephemeris`]: the [`Ephemeris`] capability and its siderust backend
//! - [`services`]: [`MoonPhaseCalculator`] and the polled [`MoonPhaseSensor`]
//! - [`models`]: observer, phase classification and the snapshot
//! - [`time`]: the output time zone
//! - [`config`]: TOML configuration
//! - [`python`]: PyO3 bindings (feature `python`)
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use moon_phase::{MoonPhaseCalculator, SiderustEphemeris};
//! use qtty::angular::Degrees;
//!
//! let calc = MoonPhaseCalculator::new(SiderustEphemeris::default());
//! let snapshot = calc.compute(Degrees::new(52.52), Degrees::new(13.405), Utc::now())?;
//! println!("{} {}", snapshot.state(), snapshot.icon());
//! # Ok::<(), moon_phase::AstronomicalResolutionError>(())
//! ```

pub mod config;
pub mod ephemeris;
pub mod error;
pub mod models;
pub mod services;
pub mod time;

#[cfg(feature = "python")]
pub mod python;

pub use config::MoonPhaseConfig;
pub use ephemeris::{Ephemeris, SiderustEphemeris};
pub use error::{AstronomicalResolutionError, ConfigError, ConfigResult, ResolutionResult};
pub use models::{MoonPhase, MoonSnapshot, Observer};
pub use services::{MoonPhaseCalculator, MoonPhaseSensor};
pub use time::OutputZone;
