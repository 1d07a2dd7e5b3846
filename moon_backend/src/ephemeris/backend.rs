//! Ephemeris backend delegating to the siderust lunar theory.
//!
//! Positions come from `Moon::get_horizontal` and `Moon::phase_topocentric`,
//! horizon events from siderust's altitude crossing search and principal
//! phases from `Moon::phase_events`. siderust works on the TT axis without
//! refraction, so this module converts UTC instants at the edges and applies
//! the atmosphere itself.

use chrono::{DateTime, Utc};
use qtty::angular::{Degree, Degrees, Radian, Radians};
use qtty::length::{AstronomicalUnit, AstronomicalUnits, Kilometer, Kilometers, Meters};
use qtty::time::Days;
use siderust::bodies::solar_system::Moon;
use siderust::coordinates::centers::Geodetic;
use siderust::coordinates::frames::ECEF;
use siderust::coordinates::transform::context::DefaultEphemeris;
use siderust::ephemeris::Ephemeris as _;
use siderust::event::altitude::{crossings, CrossingDirection, SearchOpts};
use siderust::event::lunar::phase::{PhaseKind, PhaseSearchOpts};
use siderust::time::{Interval, JulianDate, ModifiedJulianDate, JD};

use super::{Ephemeris, HorizonEvent, LunarPhaseEvent, MoonPosition, SearchDirection};
use crate::error::{AstronomicalResolutionError, ResolutionResult};
use crate::models::Observer;

/// Mean radius of the Moon in km.
const MOON_RADIUS_KM: f64 = 1_737.4;

const DEFAULT_PRESSURE_MBAR: f64 = 1010.0;
const DEFAULT_TEMPERATURE_C: f64 = 15.0;

/// Below this true altitude the refraction model is not evaluated.
const REFRACTION_FLOOR_DEG: f64 = -2.0;

/// How far from the start instant rise and set are searched.
const HORIZON_WINDOW_DAYS: f64 = 2.0;

/// Longer than any synodic month.
const LUNATION_WINDOW_DAYS: f64 = 31.0;

/// One second.
const EVENT_TOLERANCE_DAYS: f64 = 1.0 / 86_400.0;

/// Ephemeris backed by siderust's ELP2000/VSOP87 models.
///
/// Atmospheric conditions only affect altitudes and rise/set times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderustEphemeris {
    pressure_mbar: f64,
    temperature_c: f64,
}

impl Default for SiderustEphemeris {
    fn default() -> Self {
        Self {
            pressure_mbar: DEFAULT_PRESSURE_MBAR,
            temperature_c: DEFAULT_TEMPERATURE_C,
        }
    }
}

/// Atmospheric refraction in degrees for a true (airless) altitude.
///
/// Saemundsson's formula scaled for pressure and temperature.
fn refraction_deg(true_altitude_deg: f64, pressure_mbar: f64, temperature_c: f64) -> f64 {
    if true_altitude_deg < REFRACTION_FLOOR_DEG || pressure_mbar <= 0.0 {
        return 0.0;
    }
    let h = true_altitude_deg;
    let arcmin = 1.02 / (h + 10.3 / (h + 5.11)).to_radians().tan();
    let scale = (pressure_mbar / 1010.0) * (283.0 / (273.0 + temperature_c));
    arcmin * scale / 60.0
}

/// Apparent angular semidiameter of the Moon in degrees.
fn moon_semidiameter_deg(distance_km: f64) -> f64 {
    (MOON_RADIUS_KM / distance_km).clamp(-1.0, 1.0).asin().to_degrees()
}

fn finite(value: f64, what: &'static str) -> ResolutionResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AstronomicalResolutionError::NonFinite(what))
    }
}

fn site(observer: &Observer) -> Geodetic<ECEF> {
    Geodetic::<ECEF>::new(observer.longitude(), observer.latitude(), Meters::new(0.0))
}

fn tt_mjd(instant: DateTime<Utc>) -> ResolutionResult<ModifiedJulianDate> {
    Ok(ModifiedJulianDate::try_from_chrono(instant)?)
}

fn to_utc(mjd: ModifiedJulianDate) -> ResolutionResult<DateTime<Utc>> {
    Ok(mjd.try_to_chrono()?)
}

fn search_window(
    start: ModifiedJulianDate,
    days: f64,
    direction: SearchDirection,
) -> Interval<ModifiedJulianDate> {
    let span = Days::new(days);
    match direction {
        SearchDirection::Forward => Interval::new(start, start + span),
        SearchDirection::Backward => Interval::new(start - span, start),
    }
}

/// Nearest hit to the window's anchor: the first forward, the last backward.
fn nearest<I>(mut hits: I, direction: SearchDirection) -> Option<ModifiedJulianDate>
where
    I: Iterator<Item = ModifiedJulianDate>,
{
    match direction {
        SearchDirection::Forward => hits.next(),
        SearchDirection::Backward => hits.last(),
    }
}

fn phase_kind(event: LunarPhaseEvent) -> PhaseKind {
    match event {
        LunarPhaseEvent::New => PhaseKind::NewMoon,
        LunarPhaseEvent::Full => PhaseKind::FullMoon,
    }
}

fn geocentric_distance(jd: JulianDate) -> Kilometers {
    DefaultEphemeris::moon_geocentric(jd).distance()
}

impl SiderustEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the refraction conditions. A zero pressure disables refraction.
    pub fn with_atmosphere(pressure_mbar: f64, temperature_c: f64) -> Self {
        Self {
            pressure_mbar,
            temperature_c,
        }
    }

    fn apparent(&self, geometric_deg: f64) -> f64 {
        geometric_deg + refraction_deg(geometric_deg, self.pressure_mbar, self.temperature_c)
    }

    /// Geometric topocentric altitude of the Moon's centre, in degrees.
    fn geometric_altitude_deg(&self, site: Geodetic<ECEF>, jd: JulianDate) -> f64 {
        Moon::get_horizontal::<Kilometer>(jd, site)
            .alt()
            .to::<Degree>()
            .value()
    }

    /// Apparent altitude of the upper limb; zero at rise and set.
    fn upper_limb_altitude_deg(&self, site: Geodetic<ECEF>, jd: JulianDate) -> f64 {
        let limb = self.geometric_altitude_deg(site, jd)
            + moon_semidiameter_deg(geocentric_distance(jd).value());
        self.apparent(limb)
    }

    /// Geometric altitude of the centre at which the upper limb appears on
    /// the horizon.
    ///
    /// Solves `L + R(L) = 0` for the limb by fixed-point iteration, then
    /// lowers it by the semidiameter at `jd`.
    fn horizon_threshold(&self, jd: JulianDate) -> ResolutionResult<Degrees> {
        let mut limb = 0.0;
        for _ in 0..6 {
            limb = -refraction_deg(limb, self.pressure_mbar, self.temperature_c);
        }
        let threshold = limb - moon_semidiameter_deg(geocentric_distance(jd).value());
        Ok(Degrees::new(finite(threshold, "horizon threshold")?))
    }
}

impl Ephemeris for SiderustEphemeris {
    fn moon(&self, observer: &Observer) -> ResolutionResult<MoonPosition> {
        let site = site(observer);
        let jd = tt_mjd(observer.instant())?.to::<JD>();

        let geometry = Moon::phase_topocentric(jd, site);
        let eastward = geometry.elongation.value();
        let signed_elongation = if eastward > std::f64::consts::PI {
            eastward - std::f64::consts::TAU
        } else {
            eastward
        };

        let distance = geocentric_distance(jd).to::<AstronomicalUnit>();
        let altitude_deg = self.apparent(self.geometric_altitude_deg(site, jd));

        Ok(MoonPosition {
            elongation: Radians::new(finite(signed_elongation, "moon elongation")?),
            earth_distance: AstronomicalUnits::new(finite(distance.value(), "moon distance")?),
            altitude: Degrees::new(finite(altitude_deg, "moon altitude")?).to::<Radian>(),
            phase_percent: finite(
                geometry.illuminated_fraction.value() * 100.0,
                "moon phase",
            )?,
        })
    }

    fn horizon_event(
        &self,
        observer: &Observer,
        event: HorizonEvent,
        direction: SearchDirection,
    ) -> ResolutionResult<DateTime<Utc>> {
        let start = tt_mjd(observer.instant())?;
        let threshold = self.horizon_threshold(start.to::<JD>())?;
        let wanted = match event {
            HorizonEvent::Rising => CrossingDirection::Rising,
            HorizonEvent::Setting => CrossingDirection::Setting,
        };
        let opts = SearchOpts {
            time_tolerance: Days::new(EVENT_TOLERANCE_DAYS),
        };

        let found = crossings(
            &Moon,
            &site(observer),
            search_window(start, HORIZON_WINDOW_DAYS, direction),
            threshold,
            opts,
        );
        let hit = nearest(
            found
                .into_iter()
                .filter(|crossing| crossing.direction == wanted)
                .map(|crossing| crossing.mjd),
            direction,
        );

        match hit {
            Some(mjd) => {
                let instant = to_utc(mjd)?;
                log::trace!("{:?} {:?} from {}: {}", event, direction, observer.instant(), instant);
                Ok(instant)
            }
            None => {
                let window_hours = HORIZON_WINDOW_DAYS * 24.0;
                Err(match event {
                    HorizonEvent::Rising => AstronomicalResolutionError::NeverRises { window_hours },
                    HorizonEvent::Setting => AstronomicalResolutionError::NeverSets { window_hours },
                })
            }
        }
    }

    fn lunar_phase_event(
        &self,
        from: DateTime<Utc>,
        event: LunarPhaseEvent,
        direction: SearchDirection,
    ) -> ResolutionResult<DateTime<Utc>> {
        let kind = phase_kind(event);
        let window = search_window(tt_mjd(from)?, LUNATION_WINDOW_DAYS, direction);

        let events = Moon::phase_events(window, PhaseSearchOpts::default());
        let mjd = nearest(
            events
                .into_iter()
                .filter(|phase| phase.kind == kind)
                .map(|phase| phase.mjd),
            direction,
        )
        .ok_or(AstronomicalResolutionError::EventNotFound {
            event: event.name(),
            window_days: LUNATION_WINDOW_DAYS,
        })?;

        let instant = to_utc(mjd)?;
        log::trace!("{} {:?} from {}: {}", event.name(), direction, from, instant);
        Ok(instant)
    }
}
