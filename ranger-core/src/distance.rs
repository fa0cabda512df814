//! Pulse durations and distances
//!
//! The HC-SR04 reports the round trip of its ultrasonic burst as the width of
//! the echo pulse. Half of that time, multiplied by the speed of sound, is the
//! distance to the object.

/// Speed of sound in air at roughly 20°C (cm/µs)
pub const SPEED_OF_SOUND_CM_PER_US: f64 = 0.0343;

/// Width of one echo pulse in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPulseDuration(pub u32);

impl RawPulseDuration {
    /// Pulse between a rising and a falling edge timestamp (µs since boot)
    ///
    /// Returns `None` if the falling edge precedes the rising one or the pulse
    /// does not fit in 32 bits.
    pub fn from_edges(rising_us: u64, falling_us: u64) -> Option<Self> {
        let elapsed = falling_us.checked_sub(rising_us)?;
        u32::try_from(elapsed).ok().map(Self)
    }
}

/// Distance to the reflecting object in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Distance(f32);

impl Distance {
    /// Wraps a distance in centimeters
    pub const fn from_cm(cm: f32) -> Self {
        Self(cm)
    }

    /// Converts an echo pulse to the one-way distance
    ///
    /// Computed in double precision and rounded once to `f32`, so the two
    /// decimal readout matches the sensor's reference formula.
    pub fn from_pulse(pulse: RawPulseDuration) -> Self {
        Self((f64::from(pulse.0) * SPEED_OF_SOUND_CM_PER_US / 2.0) as f32)
    }

    /// Distance in centimeters
    pub fn cm(self) -> f32 {
        self.0
    }

    /// Whether the distance lies in `[min_cm, max_cm]`
    pub fn is_within(self, min_cm: f32, max_cm: f32) -> bool {
        self.0 >= min_cm && self.0 <= max_cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_edges() {
        assert_eq!(
            RawPulseDuration::from_edges(60, 118),
            Some(RawPulseDuration(58))
        );
        assert_eq!(RawPulseDuration::from_edges(100, 100), Some(RawPulseDuration(0)));
    }

    #[test]
    fn test_from_edges_reversed() {
        assert_eq!(RawPulseDuration::from_edges(118, 60), None);
    }

    #[test]
    fn test_from_edges_overflow() {
        assert_eq!(RawPulseDuration::from_edges(0, u64::from(u32::MAX) + 1), None);
    }

    #[test]
    fn test_twenty_centimeters() {
        let distance = Distance::from_pulse(RawPulseDuration(1166));
        assert!((distance.cm() - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_double_precision_rounding() {
        // Single precision arithmetic would land just below 15.435
        let distance = Distance::from_pulse(RawPulseDuration(900));
        assert_eq!(distance.cm(), 15.435_f64 as f32);
    }

    #[test]
    fn test_near_field_dead_zone() {
        let distance = Distance::from_pulse(RawPulseDuration(58));
        assert!(distance.cm() < 2.0);
        assert!(!distance.is_within(2.0, 400.0));
    }

    #[test]
    fn test_range_boundaries() {
        assert!(!Distance::from_cm(1.99).is_within(2.0, 400.0));
        assert!(Distance::from_cm(2.0).is_within(2.0, 400.0));
        assert!(Distance::from_cm(400.0).is_within(2.0, 400.0));
        assert!(!Distance::from_cm(400.01).is_within(2.0, 400.0));
    }

    proptest! {
        #[test]
        fn prop_duration_is_edge_difference(rising in 0u64..1_000_000_000, width in 0u32..=u32::MAX) {
            let falling = rising + u64::from(width);
            prop_assert_eq!(RawPulseDuration::from_edges(rising, falling), Some(RawPulseDuration(width)));
        }

        #[test]
        fn prop_distance_formula(us in 0u32..100_000) {
            let distance = Distance::from_pulse(RawPulseDuration(us));
            prop_assert_eq!(distance.cm(), ((us as f64 * 0.0343) / 2.0) as f32);
        }

        #[test]
        fn prop_distance_is_pure(us in any::<u32>()) {
            let pulse = RawPulseDuration(us);
            prop_assert_eq!(Distance::from_pulse(pulse), Distance::from_pulse(pulse));
        }
    }
}
