//! Trigger pulse generation
//!
//! Starts one ranging cycle per period by pulsing the HC-SR04 trigger input.

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::PIN_17;
use embassy_rp::Peri;
use embassy_time::Timer;
use ranger_core::RangingConfig;

/// Periodic trigger task
#[embassy_executor::task]
pub async fn trigger(trigger_pin: Peri<'static, PIN_17>) {
    let config = RangingConfig::DEFAULT;
    let mut trigger = Output::new(trigger_pin, Level::Low);

    loop {
        trigger.set_high();
        Timer::after(config.trigger_pulse).await;
        trigger.set_low();

        Timer::after(config.trigger_period).await;
    }
}
