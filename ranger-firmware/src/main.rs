//! Distance meter firmware entry point
//!
//! Measures distance with an HC-SR04 and shows it on an SSD1306 OLED.
//!
//! # Contexts
//! - Interrupt executor (SWI_IRQ_1): echo edge capture
//! - Thread executor: trigger, measurement and render tasks

#![no_std]
#![no_main]

use crate::task::{edge_capture::edge_capture, measure::measure, render::render, trigger::trigger};
use defmt::info;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use system::resources::{AssignedResources, DisplayResources, UltrasonicDistanceSensorResources};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Executor for the echo edge context, preempts the thread executor
static EXECUTOR_EDGE: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_EDGE.on_interrupt()
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    info!("Distance meter starting");

    let r = split_resources!(p);
    let UltrasonicDistanceSensorResources {
        trigger_pin,
        echo_pin,
    } = r.us_distance_sensor;

    // Edge capture first, so the first trigger pulse cannot race its echo
    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let edge_spawner = EXECUTOR_EDGE.start(interrupt::SWI_IRQ_1);
    edge_spawner.spawn(edge_capture(echo_pin)).unwrap();

    spawner.spawn(measure()).unwrap();
    spawner.spawn(render(r.display)).unwrap();
    spawner.spawn(trigger(trigger_pin)).unwrap();
}
