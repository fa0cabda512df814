//! Hardware Resource Management
//!
//! Assigns the pins and peripherals used by the distance meter to the tasks
//! that own them.
//!
//! # Resource Groups
//! - Distance Sensor: HC-SR04 trigger and echo pins
//! - Display: SSD1306 OLED on I2C0

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, I2C0};
use embassy_rp::Peri;

/// I2C clock for the display (fast mode)
pub const DISPLAY_I2C_FREQUENCY: u32 = 400_000;

assign_resources! {
    /// HC-SR04 ultrasonic distance sensor pins
    us_distance_sensor: UltrasonicDistanceSensorResources {
       trigger_pin: PIN_17,
       echo_pin: PIN_16,
    },
    /// SSD1306 128x32 OLED
    display: DisplayResources {
        i2c: I2C0,
        sda_pin: PIN_4,
        scl_pin: PIN_5,
    },
}

bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
