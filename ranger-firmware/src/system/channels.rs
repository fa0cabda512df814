//! Ranging channels
//!
//! The single instance of the queues and signal connecting the echo edge
//! context to the measurement and render tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use ranger_core::RangingChannels;

/// Time queue, distance queue and sample ready signal.
///
/// `CriticalSectionRawMutex` because the edge capture task runs on the
/// interrupt executor and preempts the other tasks.
pub static RANGING: RangingChannels<CriticalSectionRawMutex> = RangingChannels::new();
