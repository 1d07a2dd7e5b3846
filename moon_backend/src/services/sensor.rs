//! Polled sensor wrapper around [`MoonPhaseCalculator`].
//!
//! Hosts call [`MoonPhaseSensor::update`] on their own schedule and read the
//! cached state, icon and attributes in between.

use chrono::{DateTime, Utc};
use qtty::angular::Degrees;
use serde_json::{Map, Value};

use super::moon_phase::MoonPhaseCalculator;
use crate::ephemeris::{Ephemeris, SiderustEphemeris};
use crate::error::ResolutionResult;
use crate::models::{MoonSnapshot, DEFAULT_MOON_ICON};
use crate::time::OutputZone;

pub const SENSOR_NAME: &str = "Moon Phase";

/// A moon phase sensor for one fixed location.
#[derive(Debug, Clone)]
pub struct MoonPhaseSensor<E: Ephemeris = SiderustEphemeris> {
    calculator: MoonPhaseCalculator<E>,
    latitude: Degrees,
    longitude: Degrees,
    snapshot: Option<MoonSnapshot>,
}

impl MoonPhaseSensor<SiderustEphemeris> {
    /// Sensor backed by the built-in ephemeris.
    pub fn with_default_ephemeris(latitude: Degrees, longitude: Degrees, zone: OutputZone) -> Self {
        Self::new(
            MoonPhaseCalculator::with_zone(SiderustEphemeris::default(), zone),
            latitude,
            longitude,
        )
    }
}

impl<E: Ephemeris> MoonPhaseSensor<E> {
    pub fn new(calculator: MoonPhaseCalculator<E>, latitude: Degrees, longitude: Degrees) -> Self {
        log::debug!(
            "Initializing {} sensor at ({}, {})",
            SENSOR_NAME,
            latitude.value(),
            longitude.value()
        );
        Self {
            calculator,
            latitude,
            longitude,
            snapshot: None,
        }
    }

    pub fn name(&self) -> &'static str {
        SENSOR_NAME
    }

    /// Recompute the snapshot for `now`.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned to the caller.
    pub fn update(&mut self, now: DateTime<Utc>) -> ResolutionResult<&MoonSnapshot> {
        match self.calculator.compute(self.latitude, self.longitude, now) {
            Ok(snapshot) => {
                log::debug!("{} sensor updated to: {}", SENSOR_NAME, snapshot.state());
                Ok(self.snapshot.insert(snapshot))
            }
            Err(e) => {
                log::warn!(
                    "Moon phase update failed for ({}, {}) at {}: {}",
                    self.latitude.value(),
                    self.longitude.value(),
                    now,
                    e
                );
                Err(e)
            }
        }
    }

    pub fn update_now(&mut self) -> ResolutionResult<&MoonSnapshot> {
        self.update(Utc::now())
    }

    pub fn snapshot(&self) -> Option<&MoonSnapshot> {
        self.snapshot.as_ref()
    }

    /// Phase label, `None` before the first successful update.
    pub fn state(&self) -> Option<&'static str> {
        self.snapshot.as_ref().map(MoonSnapshot::state)
    }

    pub fn icon(&self) -> &'static str {
        self.snapshot
            .as_ref()
            .map(MoonSnapshot::icon)
            .unwrap_or(DEFAULT_MOON_ICON)
    }

    /// Attribute mapping, empty before the first successful update.
    pub fn attributes(&self) -> Map<String, Value> {
        self.snapshot
            .as_ref()
            .map(MoonSnapshot::attributes)
            .unwrap_or_default()
    }
}
