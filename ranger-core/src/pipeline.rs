//! Interrupt-to-task handoff
//!
//! Carries measurements from the echo edge context to the measurement and
//! render tasks.
//!
//! # Channels
//! - Time queue: raw pulse widths, edge capture -> measurement
//! - Distance queue: converted distances, measurement -> render
//! - Sample ready: binary wake-up for the render task, raised by edge capture
//!
//! Both queues hold [`QUEUE_DEPTH`] entries. Producers never block: when a
//! queue is full the new value is dropped and counted. The wake-up signal is
//! independent of the data, so a lost wake-up never loses a sample and a lost
//! sample never leaves a stale wake-up behind for long.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use portable_atomic::{AtomicU32, Ordering};

use crate::distance::{Distance, RawPulseDuration};

/// Capacity of the time and distance queues
pub const QUEUE_DEPTH: usize = 32;

/// Number of values discarded because a queue was full
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DropStats {
    /// Pulses dropped by edge capture
    pub pulses: u32,
    /// Distances dropped by the measurement step
    pub distances: u32,
}

impl DropStats {
    pub fn total(&self) -> u32 {
        self.pulses.saturating_add(self.distances)
    }
}

/// Queues and signal shared between the echo context and the tasks
///
/// Meant to live in a `static`; all methods take `&self`.
pub struct RangingChannels<M: RawMutex> {
    pulses: Channel<M, RawPulseDuration, QUEUE_DEPTH>,
    distances: Channel<M, Distance, QUEUE_DEPTH>,
    sample_ready: Signal<M, ()>,
    dropped_pulses: AtomicU32,
    dropped_distances: AtomicU32,
}

impl<M: RawMutex> RangingChannels<M> {
    pub const fn new() -> Self {
        Self {
            pulses: Channel::new(),
            distances: Channel::new(),
            sample_ready: Signal::new(),
            dropped_pulses: AtomicU32::new(0),
            dropped_distances: AtomicU32::new(0),
        }
    }

    /// Hands a completed pulse to the measurement task and wakes the renderer
    ///
    /// Safe to call from interrupt context. The pulse is queued before the
    /// signal is raised. Returns `false` if the time queue was full and the
    /// pulse was dropped; the signal is raised either way.
    pub fn publish_pulse(&self, pulse: RawPulseDuration) -> bool {
        let queued = self.pulses.try_send(pulse).is_ok();
        if !queued {
            self.dropped_pulses.fetch_add(1, Ordering::Relaxed);
        }
        self.sample_ready.signal(());
        queued
    }

    /// Waits up to `wait` for the next pulse
    pub async fn next_pulse(&self, wait: Duration) -> Option<RawPulseDuration> {
        with_timeout(wait, self.pulses.receive()).await.ok()
    }

    /// Takes a pulse if one is queued
    #[cfg(test)]
    pub(crate) fn try_next_pulse(&self) -> Option<RawPulseDuration> {
        self.pulses.try_receive().ok()
    }

    /// Queues a distance for the render task, dropping it if the queue is full
    pub fn publish_distance(&self, distance: Distance) -> bool {
        let queued = self.distances.try_send(distance).is_ok();
        if !queued {
            self.dropped_distances.fetch_add(1, Ordering::Relaxed);
        }
        queued
    }

    /// Waits up to `wait` for the sample ready signal, consuming it
    pub async fn wait_sample_ready(&self, wait: Duration) -> bool {
        with_timeout(wait, self.sample_ready.wait()).await.is_ok()
    }

    /// Drains the distance queue and returns the newest entry
    pub fn latest_distance(&self) -> Option<Distance> {
        let mut latest = None;
        while let Ok(distance) = self.distances.try_receive() {
            latest = Some(distance);
        }
        latest
    }

    /// Number of pulses waiting for conversion
    #[cfg(test)]
    pub(crate) fn pending_pulses(&self) -> usize {
        self.pulses.len()
    }

    /// Number of distances waiting to be rendered
    #[cfg(test)]
    pub(crate) fn pending_distances(&self) -> usize {
        self.distances.len()
    }

    pub fn drops(&self) -> DropStats {
        DropStats {
            pulses: self.dropped_pulses.load(Ordering::Relaxed),
            distances: self.dropped_distances.load(Ordering::Relaxed),
        }
    }
}

impl<M: RawMutex> Default for RangingChannels<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::Instant;

    type Channels = RangingChannels<CriticalSectionRawMutex>;

    #[test]
    fn test_pulse_handoff() {
        let channels = Channels::new();
        assert!(channels.publish_pulse(RawPulseDuration(1166)));
        assert_eq!(channels.try_next_pulse(), Some(RawPulseDuration(1166)));
        assert_eq!(channels.try_next_pulse(), None);
    }

    #[test]
    fn test_pulse_raises_signal() {
        let channels = Channels::new();
        channels.publish_pulse(RawPulseDuration(10));
        assert!(block_on(channels.wait_sample_ready(Duration::from_millis(10))));
    }

    #[test]
    fn test_signal_is_binary() {
        let channels = Channels::new();
        channels.publish_pulse(RawPulseDuration(10));
        channels.publish_pulse(RawPulseDuration(20));
        assert!(block_on(channels.wait_sample_ready(Duration::from_millis(10))));
        assert!(!block_on(channels.wait_sample_ready(Duration::from_millis(10))));
        // Both pulses are still queued
        assert_eq!(channels.pending_pulses(), 2);
    }

    #[test]
    fn test_signal_timeout_is_bounded() {
        let channels = Channels::new();
        let start = Instant::now();
        assert!(!block_on(channels.wait_sample_ready(Duration::from_millis(30))));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_next_pulse_timeout() {
        let channels = Channels::new();
        assert_eq!(block_on(channels.next_pulse(Duration::from_millis(5))), None);
        channels.publish_pulse(RawPulseDuration(42));
        assert_eq!(
            block_on(channels.next_pulse(Duration::from_millis(5))),
            Some(RawPulseDuration(42))
        );
    }

    #[test]
    fn test_pulse_burst_drops_newest() {
        let channels = Channels::new();
        let burst = QUEUE_DEPTH as u32 + 8;
        for us in 0..burst {
            channels.publish_pulse(RawPulseDuration(us));
        }
        assert_eq!(channels.pending_pulses(), QUEUE_DEPTH);
        assert_eq!(channels.drops().pulses, 8);

        // Retained pulses come out once each, oldest first
        for us in 0..QUEUE_DEPTH as u32 {
            assert_eq!(channels.try_next_pulse(), Some(RawPulseDuration(us)));
        }
        assert_eq!(channels.try_next_pulse(), None);
    }

    #[test]
    fn test_latest_distance_drains() {
        let channels = Channels::new();
        for cm in [10.0, 20.0, 30.0] {
            channels.publish_distance(Distance::from_cm(cm));
        }
        assert_eq!(channels.latest_distance(), Some(Distance::from_cm(30.0)));
        assert_eq!(channels.pending_distances(), 0);
        assert_eq!(channels.latest_distance(), None);
    }

    #[test]
    fn test_distance_burst_bounded() {
        let channels = Channels::new();
        for cm in 0..(QUEUE_DEPTH + 5) {
            channels.publish_distance(Distance::from_cm(cm as f32));
        }
        assert_eq!(channels.pending_distances(), QUEUE_DEPTH);
        assert_eq!(
            channels.drops(),
            DropStats {
                pulses: 0,
                distances: 5
            }
        );
        assert_eq!(
            channels.latest_distance(),
            Some(Distance::from_cm((QUEUE_DEPTH - 1) as f32))
        );
    }

    #[test]
    fn test_drop_total() {
        let stats = DropStats {
            pulses: 3,
            distances: 4,
        };
        assert_eq!(stats.total(), 7);
    }
}
