use chrono::{DateTime, Utc};
use serde::*;

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const MJD_UNIX_EPOCH: f64 = 40_587.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Modified Julian Date on the UTC scale.
///
/// Differences between two values are fractional days.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(qtty::time::Days);

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new<V: Into<qtty::time::Days>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Convert a UTC timestamp to MJD, keeping sub-second precision.
    pub fn from_utc(dt: &DateTime<Utc>) -> Self {
        let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        Self::new(secs / SECONDS_PER_DAY + MJD_UNIX_EPOCH)
    }

    /// Fractional days elapsed since `earlier`.
    pub fn days_since(&self, earlier: &ModifiedJulianDate) -> f64 {
        self.value() - earlier.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unix_epoch_is_mjd_40587() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ModifiedJulianDate::from_utc(&epoch).value(), 40_587.0);
    }

    #[test]
    fn test_known_utc_to_mjd() {
        // MJD 59580.0 = 2022-01-01 00:00:00 UTC
        let new_year = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ModifiedJulianDate::from_utc(&new_year).value(), 59_580.0);
    }

    #[test]
    fn test_sub_second_precision() {
        let t = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(500);
        let mjd = ModifiedJulianDate::from_utc(&t).value();
        assert!((mjd - (59_580.0 + 0.5 / SECONDS_PER_DAY)).abs() < 1e-10);
    }

    #[test]
    fn test_days_since() {
        let a = ModifiedJulianDate::new(60_000.25);
        let b = ModifiedJulianDate::new(60_002.75);
        assert!((b.days_since(&a) - 2.5).abs() < 1e-12);
    }
}
