//! Echo edge capture
//!
//! Pairs rising and falling edges of the echo pin into pulse durations. The
//! state is owned by the single context that services the echo interrupt, so
//! it needs no locking. Every call is O(1) and never blocks.

use crate::distance::RawPulseDuration;

/// Direction of a transition on the echo pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    /// Classifies an edge by the pin level read right after it
    pub fn from_level(is_high: bool) -> Self {
        if is_high {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}

/// Timestamp of the pending rising edge
#[derive(Debug, Default)]
pub struct EdgeCapture {
    rising_us: Option<u64>,
}

impl EdgeCapture {
    pub const fn new() -> Self {
        Self { rising_us: None }
    }

    /// Feeds one edge observed at `now_us`
    ///
    /// A rising edge only records its timestamp, replacing an unmatched
    /// earlier one. A falling edge consumes the recorded rise and returns the
    /// pulse; without a recorded rise it is ignored.
    pub fn on_edge(&mut self, edge: Edge, now_us: u64) -> Option<RawPulseDuration> {
        match edge {
            Edge::Rising => {
                self.rising_us = Some(now_us);
                None
            }
            Edge::Falling => {
                let rising_us = self.rising_us.take()?;
                RawPulseDuration::from_edges(rising_us, now_us)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rise_then_fall() {
        let mut capture = EdgeCapture::new();
        assert_eq!(capture.on_edge(Edge::Rising, 60), None);
        assert_eq!(capture.on_edge(Edge::Falling, 118), Some(RawPulseDuration(58)));
        // The rise is consumed by its fall
        assert_eq!(capture.on_edge(Edge::Falling, 200), None);
    }

    #[test]
    fn test_fall_without_rise() {
        let mut capture = EdgeCapture::new();
        assert_eq!(capture.on_edge(Edge::Falling, 500), None);
    }

    #[test]
    fn test_double_rise_keeps_newest() {
        let mut capture = EdgeCapture::new();
        capture.on_edge(Edge::Rising, 100);
        capture.on_edge(Edge::Rising, 250);
        assert_eq!(capture.on_edge(Edge::Falling, 300), Some(RawPulseDuration(50)));
    }

    #[test]
    fn test_one_pulse_per_cycle() {
        let mut capture = EdgeCapture::new();
        capture.on_edge(Edge::Rising, 0);
        assert!(capture.on_edge(Edge::Falling, 1166).is_some());
        // A second fall in the same cycle has no matching rise
        assert_eq!(capture.on_edge(Edge::Falling, 1200), None);
    }

    #[test]
    fn test_edge_from_level() {
        assert_eq!(Edge::from_level(true), Edge::Rising);
        assert_eq!(Edge::from_level(false), Edge::Falling);
    }

    proptest! {
        #[test]
        fn prop_cycles_yield_exact_widths(
            start in 0u64..1_000_000,
            widths in proptest::collection::vec(0u32..40_000, 1..64),
        ) {
            let mut capture = EdgeCapture::new();
            let mut now = start;
            for width in widths {
                prop_assert_eq!(capture.on_edge(Edge::Rising, now), None);
                now += u64::from(width);
                prop_assert_eq!(capture.on_edge(Edge::Falling, now), Some(RawPulseDuration(width)));
                now += 100_000;
            }
        }
    }
}
