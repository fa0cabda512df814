//! Echo edge capture
//!
//! Timestamps both edges of the HC-SR04 echo pulse and hands completed pulses
//! to the measurement task.
//!
//! # Execution Context
//! - Runs on the interrupt executor, above all thread-mode tasks
//! - Woken by the GPIO edge interrupt of the echo pin
//! - Only non-blocking queue and signal operations, no allocation
//!
//! The pin level read after the wake-up tells rising from falling. The echo
//! pulse of the sensor is at least ~100µs wide, far longer than the wake-up
//! latency at this priority.

use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::PIN_16;
use embassy_rp::Peri;
use embassy_time::Instant;
use ranger_core::{Edge, EdgeCapture};

use crate::system::channels::RANGING;

/// Edge capture task, spawned on the interrupt executor
#[embassy_executor::task]
pub async fn edge_capture(echo_pin: Peri<'static, PIN_16>) {
    // The sensor drives the echo line actively; the pull-down only keeps it
    // low while the sensor is disconnected.
    let mut echo = Input::new(echo_pin, Pull::Down);
    let mut capture = EdgeCapture::new();

    loop {
        echo.wait_for_any_edge().await;
        let now_us = Instant::now().as_micros();
        let edge = Edge::from_level(echo.is_high());

        if let Some(pulse) = capture.on_edge(edge, now_us) {
            // A full queue drops the pulse and counts it
            RANGING.publish_pulse(pulse);
        }
    }
}
