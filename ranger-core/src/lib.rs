//! Ultrasonic ranging pipeline
//!
//! Board-agnostic part of the ranging firmware. Everything here runs the same
//! on the target and on the host, so the timing-sensitive logic can be tested
//! without hardware:
//!
//! - Edge capture state machine turning echo edges into pulse durations
//! - Pulse to distance conversion
//! - Interrupt-to-task channel bundle (two bounded queues plus a wake-up signal)
//! - Measurement and render steps driven by the firmware tasks
//! - Display collaborator trait and frame layout

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod distance;
pub mod measure;
pub mod pipeline;
pub mod render;

pub use capture::{Edge, EdgeCapture};
pub use config::RangingConfig;
pub use distance::{Distance, RawPulseDuration};
pub use pipeline::{DropStats, RangingChannels, QUEUE_DEPTH};
pub use render::{Frame, RenderOutcome, Screen};
