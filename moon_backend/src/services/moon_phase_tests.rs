#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
    use qtty::angular::{Degrees, Radians};
    use qtty::length::AstronomicalUnits;

    use crate::ephemeris::{
        Ephemeris, HorizonEvent, LunarPhaseEvent, MoonPosition, SearchDirection,
    };
    use crate::error::{AstronomicalResolutionError, ResolutionResult};
    use crate::models::{MoonPhase, Observer};
    use crate::services::MoonPhaseCalculator;
    use crate::time::OutputZone;

    /// Ephemeris returning canned values relative to the query instant.
    #[derive(Debug, Clone)]
    struct FixedEphemeris {
        position: MoonPosition,
        /// Offsets in hours from the query instant.
        next_full_hours: i64,
        next_new_hours: i64,
        previous_new_hours: i64,
        rise_hours: i64,
        set_hours: i64,
        fail_rising: bool,
    }

    impl Default for FixedEphemeris {
        fn default() -> Self {
            Self {
                position: MoonPosition {
                    elongation: Radians::new(PI / 2.0),
                    earth_distance: AstronomicalUnits::new(0.00257),
                    altitude: Radians::new(PI / 6.0),
                    phase_percent: 50.0,
                },
                next_full_hours: 7 * 24 + 6,
                next_new_hours: 22 * 24,
                previous_new_hours: -(7 * 24 + 12),
                rise_hours: -4,
                set_hours: 8,
                fail_rising: false,
            }
        }
    }

    impl Ephemeris for FixedEphemeris {
        fn moon(&self, _observer: &Observer) -> ResolutionResult<MoonPosition> {
            Ok(self.position)
        }

        fn horizon_event(
            &self,
            observer: &Observer,
            event: HorizonEvent,
            _direction: SearchDirection,
        ) -> ResolutionResult<DateTime<Utc>> {
            match event {
                HorizonEvent::Rising if self.fail_rising => {
                    Err(AstronomicalResolutionError::NeverRises { window_hours: 48.0 })
                }
                HorizonEvent::Rising => Ok(observer.instant() + Duration::hours(self.rise_hours)),
                HorizonEvent::Setting => Ok(observer.instant() + Duration::hours(self.set_hours)),
            }
        }

        fn lunar_phase_event(
            &self,
            from: DateTime<Utc>,
            event: LunarPhaseEvent,
            direction: SearchDirection,
        ) -> ResolutionResult<DateTime<Utc>> {
            let hours = match (event, direction) {
                (LunarPhaseEvent::Full, _) => self.next_full_hours,
                (LunarPhaseEvent::New, SearchDirection::Forward) => self.next_new_hours,
                (LunarPhaseEvent::New, SearchDirection::Backward) => self.previous_new_hours,
            };
            Ok(from + Duration::hours(hours))
        }
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap()
    }

    fn compute(ephemeris: FixedEphemeris, zone: OutputZone) -> ResolutionResult<crate::models::MoonSnapshot> {
        MoonPhaseCalculator::with_zone(ephemeris, zone).compute(
            Degrees::new(48.1),
            Degrees::new(11.6),
            instant(),
        )
    }

    #[test]
    fn test_unit_conversions() {
        let snapshot = compute(FixedEphemeris::default(), OutputZone::utc()).unwrap();

        assert!((snapshot.elongation_percent - 50.0).abs() < 1e-9);
        assert!((snapshot.distance.value() - 0.00257 * 149_597_870_700.0).abs() < 1e-3);
        assert!((snapshot.altitude.value() - 30.0).abs() < 1e-9);
        assert_eq!(snapshot.latitude, Degrees::new(48.1));
        assert_eq!(snapshot.longitude, Degrees::new(11.6));
    }

    #[test]
    fn test_negative_elongation_is_kept() {
        let mut eph = FixedEphemeris::default();
        eph.position.elongation = Radians::new(-PI / 4.0);
        let snapshot = compute(eph, OutputZone::utc()).unwrap();
        assert!((snapshot.elongation_percent + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_classification_and_illumination_use_phase_fraction() {
        let snapshot = compute(FixedEphemeris::default(), OutputZone::utc()).unwrap();
        assert!((snapshot.phase - 0.5).abs() < 1e-12);
        assert_eq!(snapshot.phase_label, MoonPhase::FullMoon);
        assert!(snapshot.illumination_percent.abs() < 1e-9);
        assert_eq!(snapshot.state(), "Full Moon");
        assert_eq!(snapshot.icon(), "mdi:moon-full");
    }

    #[test]
    fn test_days_to_events_in_utc() {
        let snapshot = compute(FixedEphemeris::default(), OutputZone::utc()).unwrap();
        // 20:00 + 7d 6h lands on the 18th; 20:00 + 22d on April 1st.
        assert_eq!(snapshot.days_to_full_moon, 8);
        assert_eq!(snapshot.days_to_new_moon, 22);
    }

    #[test]
    fn test_days_to_events_use_local_event_date() {
        // Full moon at 2024-03-18 02:00 UTC is still the 18th at +10:00, but
        // the new moon at 2024-04-01 20:00 UTC is April 2nd there.
        let zone = OutputZone::Fixed(FixedOffset::east_opt(10 * 3600).unwrap());
        let snapshot = compute(FixedEphemeris::default(), zone).unwrap();
        assert_eq!(snapshot.days_to_full_moon, 8);
        assert_eq!(snapshot.days_to_new_moon, 23);
        assert_eq!(snapshot.next_new_moon.offset().local_minus_utc(), 10 * 3600);
    }

    #[test]
    fn test_rise_and_set_are_localized() {
        let zone = OutputZone::Fixed(FixedOffset::west_opt(5 * 3600).unwrap());
        let snapshot = compute(FixedEphemeris::default(), zone).unwrap();
        assert_eq!(
            snapshot.moonrise_today.with_timezone(&Utc),
            instant() - Duration::hours(4)
        );
        assert_eq!(
            snapshot.moonset_today.with_timezone(&Utc),
            instant() + Duration::hours(8)
        );
        assert_eq!(snapshot.moonset_today.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_age_from_previous_new_moon() {
        let snapshot = compute(FixedEphemeris::default(), OutputZone::utc()).unwrap();
        assert!((snapshot.age_days - 7.5).abs() < 1e-6, "age {}", snapshot.age_days);
    }

    #[test]
    fn test_resolution_failure_aborts() {
        let eph = FixedEphemeris {
            fail_rising: true,
            ..FixedEphemeris::default()
        };
        let err = compute(eph, OutputZone::utc()).unwrap_err();
        assert_eq!(err, AstronomicalResolutionError::NeverRises { window_hours: 48.0 });
    }

    #[test]
    fn test_invalid_observer_is_rejected() {
        let calc = MoonPhaseCalculator::with_zone(FixedEphemeris::default(), OutputZone::utc());
        let err = calc
            .compute(Degrees::new(91.0), Degrees::new(0.0), instant())
            .unwrap_err();
        assert!(matches!(err, AstronomicalResolutionError::InvalidObserver(_)));
    }
}
