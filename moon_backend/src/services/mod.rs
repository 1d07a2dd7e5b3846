//! Service layer: moon snapshot computation and the polled sensor built on it.

pub mod moon_phase;
pub mod sensor;

#[cfg(test)]
mod moon_phase_tests;

pub use moon_phase::MoonPhaseCalculator;
pub use sensor::{MoonPhaseSensor, SENSOR_NAME};
