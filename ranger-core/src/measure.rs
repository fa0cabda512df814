//! Measurement step
//!
//! Converts queued pulse widths into distances and forwards them to the
//! render task. Waits on the time queue with a timeout, so the task suspends
//! between samples.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use crate::distance::Distance;
use crate::pipeline::RangingChannels;

/// Result of one measurement step
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasureOutcome {
    /// No pulse arrived within the wait
    Idle,
    /// Distance queued for rendering
    Forwarded(Distance),
    /// Distance computed but the distance queue was full
    Dropped(Distance),
}

/// Waits up to `wait` for one pulse and forwards its distance
pub async fn measure_next<M: RawMutex>(
    channels: &RangingChannels<M>,
    wait: Duration,
) -> MeasureOutcome {
    let Some(pulse) = channels.next_pulse(wait).await else {
        return MeasureOutcome::Idle;
    };

    let distance = Distance::from_pulse(pulse);
    if channels.publish_distance(distance) {
        MeasureOutcome::Forwarded(distance)
    } else {
        MeasureOutcome::Dropped(distance)
    }
}
