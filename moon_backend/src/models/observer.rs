use chrono::{DateTime, Utc};
use qtty::angular::Degrees;

use crate::error::{AstronomicalResolutionError, ResolutionResult};

/// A fixed place on Earth at one UTC instant.
///
/// Built per call and never persisted. Construction validates the coordinates
/// so that degenerate observers fail before any ephemeris work is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: Degrees,
    longitude: Degrees,
    instant: DateTime<Utc>,
}

impl Observer {
    /// Create an observer at sea level.
    ///
    /// # Arguments
    /// * `latitude` - Geodetic latitude, north positive, in [-90, 90]
    /// * `longitude` - Longitude, east positive, in [-180, 180]
    /// * `instant` - Observation instant (UTC)
    pub fn new(
        latitude: Degrees,
        longitude: Degrees,
        instant: DateTime<Utc>,
    ) -> ResolutionResult<Self> {
        let lat = latitude.value();
        let lon = longitude.value();

        if !lat.is_finite() || !lon.is_finite() {
            return Err(AstronomicalResolutionError::InvalidObserver(format!(
                "coordinates must be finite (latitude {}, longitude {})",
                lat, lon
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AstronomicalResolutionError::InvalidObserver(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AstronomicalResolutionError::InvalidObserver(format!(
                "longitude {} outside [-180, 180]",
                lon
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            instant,
        })
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap()
    }

    #[test]
    fn test_valid_observer() {
        let observer = Observer::new(Degrees::new(51.48), Degrees::new(0.0), instant()).unwrap();
        assert_eq!(observer.latitude().value(), 51.48);
        assert_eq!(observer.instant(), instant());
    }

    #[test]
    fn test_poles_and_antimeridian_are_accepted() {
        assert!(Observer::new(Degrees::new(90.0), Degrees::new(180.0), instant()).is_ok());
        assert!(Observer::new(Degrees::new(-90.0), Degrees::new(-180.0), instant()).is_ok());
    }

    #[test]
    fn test_rejects_latitude_out_of_range() {
        let err = Observer::new(Degrees::new(91.0), Degrees::new(0.0), instant()).unwrap_err();
        assert!(matches!(err, AstronomicalResolutionError::InvalidObserver(_)));
    }

    #[test]
    fn test_rejects_longitude_out_of_range() {
        let err = Observer::new(Degrees::new(0.0), Degrees::new(-180.5), instant()).unwrap_err();
        assert!(matches!(err, AstronomicalResolutionError::InvalidObserver(_)));
    }

    #[test]
    fn test_rejects_nan() {
        let err = Observer::new(Degrees::new(f64::NAN), Degrees::new(0.0), instant()).unwrap_err();
        assert!(matches!(err, AstronomicalResolutionError::InvalidObserver(_)));
    }
}
