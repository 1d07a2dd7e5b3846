//! Moon phase calculation service.
//!
//! Turns an observer location and a UTC instant into a [`MoonSnapshot`]:
//! phase label, illumination, distance, altitude, next principal phases,
//! today's rise and set, and the Moon's age. All astronomy goes through the
//! injected [`Ephemeris`]; this module only combines and converts.
//!
//! ## Failure semantics
//! The computation is atomic. The first position or event the ephemeris
//! cannot resolve aborts the call and no partial snapshot is produced.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use qtty::angular::{Degree, Degrees};
use qtty::length::Meter;

use crate::ephemeris::{Ephemeris, SiderustEphemeris};
use crate::error::ResolutionResult;
use crate::models::{cosine_illumination_percent, ModifiedJulianDate, MoonPhase, MoonSnapshot};
use crate::time::OutputZone;

/// Computes moon snapshots with a given ephemeris backend.
#[derive(Debug, Clone, Default)]
pub struct MoonPhaseCalculator<E: Ephemeris = SiderustEphemeris> {
    ephemeris: E,
    zone: OutputZone,
}

impl<E: Ephemeris> MoonPhaseCalculator<E> {
    /// Calculator reporting timestamps in the host's local zone.
    pub fn new(ephemeris: E) -> Self {
        Self::with_zone(ephemeris, OutputZone::Local)
    }

    pub fn with_zone(ephemeris: E, zone: OutputZone) -> Self {
        Self { ephemeris, zone }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn zone(&self) -> OutputZone {
        self.zone
    }

    /// Compute the moon snapshot for an observer.
    ///
    /// # Arguments
    /// * `latitude` - Observer latitude, north positive
    /// * `longitude` - Observer longitude, east positive
    /// * `instant` - Evaluation instant
    ///
    /// # Returns
    /// * `Ok(MoonSnapshot)` with every field populated
    /// * `Err(AstronomicalResolutionError)` if the observer is invalid or the
    ///   ephemeris cannot resolve a position or event
    pub fn compute(
        &self,
        latitude: Degrees,
        longitude: Degrees,
        instant: DateTime<Utc>,
    ) -> ResolutionResult<MoonSnapshot> {
        let observer = self.ephemeris.observer(latitude, longitude, instant)?;
        let moon = self.ephemeris.moon(&observer)?;

        let elongation_percent = moon.elongation.value() / PI * 100.0;
        let distance = moon.earth_distance.to::<Meter>();
        let altitude = moon.altitude.to::<Degree>();
        log::debug!(
            "Moon at ({}, {}) {}: elongation {:.4}%, distance {:.0} m, altitude {:.4}°",
            latitude.value(),
            longitude.value(),
            instant,
            elongation_percent,
            distance.value(),
            altitude.value()
        );

        let next_full = self.ephemeris.next_full_moon(instant)?;
        let next_new = self.ephemeris.next_new_moon(instant)?;
        let next_full_moon = self.zone.localize(next_full);
        let next_new_moon = self.zone.localize(next_new);
        let days_to_full_moon = (next_full_moon.date_naive() - instant.date_naive()).num_days();
        let days_to_new_moon = (next_new_moon.date_naive() - instant.date_naive()).num_days();
        log::debug!(
            "Next full moon {} ({} days), next new moon {} ({} days)",
            next_full_moon,
            days_to_full_moon,
            next_new_moon,
            days_to_new_moon
        );

        let moonrise_today = self.zone.localize(self.ephemeris.previous_rising(&observer)?);
        let moonset_today = self.zone.localize(self.ephemeris.next_setting(&observer)?);
        log::debug!("Moonrise {}, moonset {}", moonrise_today, moonset_today);

        let phase = moon.phase_percent / 100.0;
        let phase_label = MoonPhase::classify(phase);
        let illumination_percent = cosine_illumination_percent(phase);
        log::debug!(
            "Phase fraction {:.6} -> {}, illumination {:.2}%",
            phase,
            phase_label,
            illumination_percent
        );

        let previous_new = self.ephemeris.previous_new_moon(instant)?;
        let age_days = ModifiedJulianDate::from_utc(&instant)
            .days_since(&ModifiedJulianDate::from_utc(&previous_new));
        log::debug!("Previous new moon {}, age {:.4} days", previous_new, age_days);

        Ok(MoonSnapshot {
            latitude,
            longitude,
            phase_label,
            phase,
            elongation_percent,
            distance,
            altitude,
            next_full_moon,
            next_new_moon,
            days_to_full_moon,
            days_to_new_moon,
            moonrise_today,
            moonset_today,
            illumination_percent,
            age_days,
        })
    }
}
