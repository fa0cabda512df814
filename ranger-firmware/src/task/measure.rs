//! Distance measurement
//!
//! Converts echo pulse widths into distances for the render task.
//!
//! # Operation
//! - Waits on the time queue for up to 20ms, then checks again
//! - Distance = pulse width * speed of sound / 2
//! - Distances that do not fit in the distance queue are dropped

use defmt::{debug, info, trace};
use ranger_core::measure::{measure_next, MeasureOutcome};
use ranger_core::RangingConfig;

use crate::system::channels::RANGING;

/// Measurement task
#[embassy_executor::task]
pub async fn measure() {
    info!("Distance measurement started");
    let config = RangingConfig::DEFAULT;

    loop {
        match measure_next(&RANGING, config.measure_wait).await {
            MeasureOutcome::Idle => {}
            MeasureOutcome::Forwarded(distance) => {
                trace!("Distance: {} cm", distance.cm());
            }
            MeasureOutcome::Dropped(distance) => {
                debug!("Distance queue full, dropped {} cm", distance.cm());
            }
        }
    }
}
