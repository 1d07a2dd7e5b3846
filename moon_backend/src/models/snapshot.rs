use chrono::{DateTime, FixedOffset};
use qtty::angular::Degrees;
use qtty::length::Meters;
use serde::Serialize;
use serde_json::{Map, Value};

use super::phase::MoonPhase;

/// Everything the calculator reports for one observer at one instant.
///
/// Either every field is populated or the computation failed; there is no
/// partially filled snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonSnapshot {
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub phase_label: MoonPhase,
    /// Illuminated fraction reported by the ephemeris, in `[0, 1]`.
    pub phase: f64,
    /// Signed elongation as a percentage of 180°.
    pub elongation_percent: f64,
    /// Earth-Moon distance in meters.
    pub distance: Meters,
    pub altitude: Degrees,
    pub next_full_moon: DateTime<FixedOffset>,
    pub next_new_moon: DateTime<FixedOffset>,
    pub days_to_full_moon: i64,
    pub days_to_new_moon: i64,
    pub moonrise_today: DateTime<FixedOffset>,
    pub moonset_today: DateTime<FixedOffset>,
    /// Cosine estimate derived from `phase`, in percent.
    pub illumination_percent: f64,
    pub age_days: f64,
}

impl MoonSnapshot {
    /// Sensor state string.
    pub fn state(&self) -> &'static str {
        self.phase_label.label()
    }

    pub fn icon(&self) -> &'static str {
        self.phase_label.icon()
    }

    /// Flat attribute mapping exposed next to the state.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("latitude".into(), Value::from(self.latitude.value()));
        attrs.insert("longitude".into(), Value::from(self.longitude.value()));
        attrs.insert("phase".into(), Value::from(self.phase));
        attrs.insert("visible".into(), Value::from(self.elongation_percent));
        attrs.insert("distance".into(), Value::from(self.distance.value()));
        attrs.insert("altitude".into(), Value::from(self.altitude.value()));
        attrs.insert(
            "next_full_moon".into(),
            Value::from(self.next_full_moon.to_rfc3339()),
        );
        attrs.insert(
            "next_new_moon".into(),
            Value::from(self.next_new_moon.to_rfc3339()),
        );
        attrs.insert(
            "days_to_full_moon".into(),
            Value::from(self.days_to_full_moon),
        );
        attrs.insert("days_to_new_moon".into(), Value::from(self.days_to_new_moon));
        attrs.insert(
            "today_moonrise".into(),
            Value::from(self.moonrise_today.to_rfc3339()),
        );
        attrs.insert(
            "today_moonset".into(),
            Value::from(self.moonset_today.to_rfc3339()),
        );
        attrs.insert("illumination".into(), Value::from(self.illumination_percent));
        attrs.insert("age_days".into(), Value::from(self.age_days));
        attrs
    }
}
