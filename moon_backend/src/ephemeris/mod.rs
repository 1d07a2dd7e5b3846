//! Ephemeris capability used by the moon phase calculator.
//!
//! The calculator only talks to the [`Ephemeris`] trait: observer
//! construction, the Moon's position for an observer, horizon events and
//! lunar phase events. [`SiderustEphemeris`] is the built-in backend;
//! tests and hosts may plug in their own.

mod backend;

use chrono::{DateTime, Utc};
use qtty::angular::{Degrees, Radians};
use qtty::length::AstronomicalUnits;

use crate::error::ResolutionResult;
use crate::models::Observer;

pub use backend::SiderustEphemeris;

/// Which way an event search walks from its start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Position of the Moon relative to an observer at the observer's instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    /// Angle from the Sun, positive when the Moon is east of it (waxing).
    pub elongation: Radians,
    /// Geocentric distance.
    pub earth_distance: AstronomicalUnits,
    /// Topocentric apparent altitude, refraction included.
    pub altitude: Radians,
    /// Illuminated share of the disk, 0-100.
    pub phase_percent: f64,
}

/// Moon crossing the horizon (upper limb).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonEvent {
    Rising,
    Setting,
}

/// Principal lunar phase searched for by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunarPhaseEvent {
    New,
    Full,
}

impl LunarPhaseEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LunarPhaseEvent::New => "new moon",
            LunarPhaseEvent::Full => "full moon",
        }
    }
}

/// Positional and event astronomy for the Moon.
pub trait Ephemeris {
    /// Build an observer at sea level.
    fn observer(
        &self,
        latitude: Degrees,
        longitude: Degrees,
        instant: DateTime<Utc>,
    ) -> ResolutionResult<Observer> {
        Observer::new(latitude, longitude, instant)
    }

    /// The Moon as seen by `observer` at its instant.
    fn moon(&self, observer: &Observer) -> ResolutionResult<MoonPosition>;

    /// Nearest horizon event from the observer's instant in `direction`.
    fn horizon_event(
        &self,
        observer: &Observer,
        event: HorizonEvent,
        direction: SearchDirection,
    ) -> ResolutionResult<DateTime<Utc>>;

    /// Nearest principal phase from `from` in `direction`.
    fn lunar_phase_event(
        &self,
        from: DateTime<Utc>,
        event: LunarPhaseEvent,
        direction: SearchDirection,
    ) -> ResolutionResult<DateTime<Utc>>;

    fn previous_rising(&self, observer: &Observer) -> ResolutionResult<DateTime<Utc>> {
        self.horizon_event(observer, HorizonEvent::Rising, SearchDirection::Backward)
    }

    fn next_rising(&self, observer: &Observer) -> ResolutionResult<DateTime<Utc>> {
        self.horizon_event(observer, HorizonEvent::Rising, SearchDirection::Forward)
    }

    fn previous_setting(&self, observer: &Observer) -> ResolutionResult<DateTime<Utc>> {
        self.horizon_event(observer, HorizonEvent::Setting, SearchDirection::Backward)
    }

    fn next_setting(&self, observer: &Observer) -> ResolutionResult<DateTime<Utc>> {
        self.horizon_event(observer, HorizonEvent::Setting, SearchDirection::Forward)
    }

    fn next_full_moon(&self, from: DateTime<Utc>) -> ResolutionResult<DateTime<Utc>> {
        self.lunar_phase_event(from, LunarPhaseEvent::Full, SearchDirection::Forward)
    }

    fn previous_full_moon(&self, from: DateTime<Utc>) -> ResolutionResult<DateTime<Utc>> {
        self.lunar_phase_event(from, LunarPhaseEvent::Full, SearchDirection::Backward)
    }

    fn next_new_moon(&self, from: DateTime<Utc>) -> ResolutionResult<DateTime<Utc>> {
        self.lunar_phase_event(from, LunarPhaseEvent::New, SearchDirection::Forward)
    }

    fn previous_new_moon(&self, from: DateTime<Utc>) -> ResolutionResult<DateTime<Utc>> {
        self.lunar_phase_event(from, LunarPhaseEvent::New, SearchDirection::Backward)
    }
}
