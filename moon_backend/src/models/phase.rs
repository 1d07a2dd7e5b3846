//! Phase classification, icon table and the cosine illumination estimate.

use std::fmt;

use serde::{Serialize, Serializer};

/// Icon used when a label has no entry in [`MOON_PHASE_ICONS`].
pub const DEFAULT_MOON_ICON: &str = "mdi:moon-waning-crescent";

/// Icon identifier per phase label.
pub const MOON_PHASE_ICONS: [(&str, &str); 4] = [
    ("New Moon", "mdi:moon-new"),
    ("First Quarter", "mdi:moon-first-quarter"),
    ("Full Moon", "mdi:moon-full"),
    ("Last Quarter", "mdi:moon-last-quarter"),
];

/// Categorical phase reported as the sensor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
}

impl MoonPhase {
    /// Classify a phase fraction.
    ///
    /// Each band is closed on its lower edge and open on its upper edge.
    /// Zero, the last eighth and anything outside `[0, 1)` (NaN included)
    /// fall through to `NewMoon`.
    pub fn classify(fraction: f64) -> Self {
        if 0.0 < fraction && fraction < 0.125 {
            MoonPhase::NewMoon
        } else if (0.125..0.375).contains(&fraction) {
            MoonPhase::FirstQuarter
        } else if (0.375..0.625).contains(&fraction) {
            MoonPhase::FullMoon
        } else if (0.625..0.875).contains(&fraction) {
            MoonPhase::LastQuarter
        } else {
            MoonPhase::NewMoon
        }
    }

    /// Display label, also the sensor state string.
    pub fn label(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::LastQuarter => "Last Quarter",
        }
    }

    pub fn icon(&self) -> &'static str {
        icon_for_label(self.label())
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MoonPhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Look up the icon for a phase label, falling back to [`DEFAULT_MOON_ICON`].
pub fn icon_for_label(label: &str) -> &'static str {
    MOON_PHASE_ICONS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_MOON_ICON)
}

/// Illumination estimate in percent from a phase fraction:
/// `(1 + cos(p * 360°)) / 2 * 100`.
///
/// This is independent of the ephemeris' own illuminated fraction.
pub fn cosine_illumination_percent(fraction: f64) -> f64 {
    (1.0 + (fraction * 360.0).to_radians().cos()) / 2.0 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(MoonPhase::classify(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(0.124_999), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(0.125), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(0.374_999), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(0.375), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::classify(0.624_999), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::classify(0.625), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::classify(0.874_999), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::classify(0.875), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(0.999_999), MoonPhase::NewMoon);
    }

    #[test]
    fn test_out_of_range_falls_back_to_new_moon() {
        assert_eq!(MoonPhase::classify(1.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(-0.1), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(f64::NAN), MoonPhase::NewMoon);
    }

    #[test]
    fn test_icons_for_known_labels() {
        assert_eq!(MoonPhase::NewMoon.icon(), "mdi:moon-new");
        assert_eq!(MoonPhase::FirstQuarter.icon(), "mdi:moon-first-quarter");
        assert_eq!(MoonPhase::FullMoon.icon(), "mdi:moon-full");
        assert_eq!(MoonPhase::LastQuarter.icon(), "mdi:moon-last-quarter");
    }

    #[test]
    fn test_unknown_label_gets_default_icon() {
        assert_eq!(icon_for_label("Waxing Gibbous"), DEFAULT_MOON_ICON);
        assert_eq!(icon_for_label(""), DEFAULT_MOON_ICON);
    }

    #[test]
    fn test_cosine_illumination_reference_points() {
        assert!((cosine_illumination_percent(0.0) - 100.0).abs() < 1e-9);
        assert!(cosine_illumination_percent(0.5).abs() < 1e-9);
        assert!((cosine_illumination_percent(0.25) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_serializes_as_string() {
        let json = serde_json::to_string(&MoonPhase::LastQuarter).unwrap();
        assert_eq!(json, "\"Last Quarter\"");
    }
}
