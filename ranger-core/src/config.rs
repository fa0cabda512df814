//! Ranging configuration
//!
//! All timing, range and layout parameters of the measure-to-display loop.
//! The firmware runs with [`RangingConfig::DEFAULT`]; tests build their own
//! values to shorten waits.

use embassy_time::Duration;

/// Tunable parameters of the ranging loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangingConfig {
    /// High time of the trigger pulse
    pub trigger_pulse: Duration,
    /// Pause between two trigger pulses
    pub trigger_period: Duration,
    /// How long the measurement step waits for a pulse before giving up
    pub measure_wait: Duration,
    /// How long the render step waits for a new sample before giving up
    pub render_wait: Duration,
    /// Shortest distance the sensor can resolve (cm)
    pub min_range_cm: f32,
    /// Longest distance the sensor can resolve (cm)
    pub max_range_cm: f32,
    /// Display width in pixels
    pub display_width: u32,
    /// Display height in pixels
    pub display_height: u32,
    /// Glyph scale used for all text
    pub text_scale: u8,
    /// Top-left corner of the label and of the fault indicator
    pub label_origin: (i32, i32),
    /// Top-left corner of the formatted distance
    pub value_origin: (i32, i32),
    /// Row of the distance bar
    pub bar_row: i32,
}

impl RangingConfig {
    /// HC-SR04 on a 128x32 SSD1306
    pub const DEFAULT: Self = Self {
        trigger_pulse: Duration::from_micros(10),
        trigger_period: Duration::from_millis(100),
        measure_wait: Duration::from_millis(20),
        render_wait: Duration::from_millis(500),
        min_range_cm: 2.0,
        max_range_cm: 400.0,
        display_width: 128,
        display_height: 32,
        text_scale: 1,
        label_origin: (0, 0),
        value_origin: (0, 10),
        bar_row: 27,
    };
}

impl Default for RangingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fits_on_display() {
        let config = RangingConfig::DEFAULT;
        assert!(config.bar_row < config.display_height as i32);
        assert!(config.value_origin.1 < config.bar_row);
    }

    #[test]
    fn test_trigger_pulse_shorter_than_period() {
        let config = RangingConfig::default();
        assert!(config.trigger_pulse < config.trigger_period);
        assert!(config.measure_wait < config.render_wait);
    }
}
