//! Distance rendering
//!
//! Turns the newest distance into a frame on the monochrome display.
//!
//! # Render cycle
//! ```text
//! WAIT_SIGNAL --(sample ready | timeout)--> DRAW_OR_SKIP --> WAIT_SIGNAL
//! ```
//! - Timeout: nothing is drawn, the display keeps the last frame
//! - Signal but no distance queued yet: the frame is skipped
//! - Distance outside the sensor range: fault indicator only
//! - Otherwise: label, value with two decimals and a proportional bar
//!
//! Every drawn frame follows clear -> draw -> flush on the [`Screen`].

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;

use crate::config::RangingConfig;
use crate::distance::Distance;
use crate::pipeline::RangingChannels;

/// Shown instead of a value when the distance is out of range
pub const FAULT_TEXT: &str = "Falha";

/// Caption above the distance value
pub const LABEL_TEXT: &str = "Distancia:";

/// Formatted distance, e.g. `"20.00 cm"`
pub type ValueText = String<16>;

/// Display driver as seen by the render step
///
/// Drawing goes to an off-screen buffer; only [`Screen::flush`] touches the
/// bus.
#[allow(async_fn_in_trait)]
pub trait Screen {
    type Error;

    /// Brings up the display controller
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Blanks the off-screen buffer
    fn clear_buffer(&mut self);

    /// Draws `text` with its top-left corner at (`x`, `y`)
    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), Self::Error>;

    /// Draws a one pixel wide line
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Self::Error>;

    /// Sends the off-screen buffer to the display
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Content of one display frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Measurement fault indicator
    Fault,
    /// Valid reading
    Reading {
        value: ValueText,
        /// Last x coordinate of the bar
        bar_end: i32,
    },
}

impl Frame {
    /// Lays out a distance according to `config`
    pub fn compose(distance: Distance, config: &RangingConfig) -> Self {
        if !distance.is_within(config.min_range_cm, config.max_range_cm) {
            return Frame::Fault;
        }

        // A range too wide for the readout is reported as a fault
        let mut value = ValueText::new();
        if write!(value, "{:.2} cm", distance.cm()).is_err() {
            return Frame::Fault;
        }

        let bar_end = bar_length(distance, config);
        Frame::Reading { value, bar_end }
    }

    /// Draws the frame and flushes it to the display
    pub async fn draw<S: Screen>(
        &self,
        screen: &mut S,
        config: &RangingConfig,
    ) -> Result<(), S::Error> {
        let (label_x, label_y) = config.label_origin;
        let scale = config.text_scale;

        screen.clear_buffer();
        match self {
            Frame::Fault => {
                screen.draw_text(label_x, label_y, scale, FAULT_TEXT)?;
            }
            Frame::Reading { value, bar_end } => {
                let (value_x, value_y) = config.value_origin;
                screen.draw_text(label_x, label_y, scale, LABEL_TEXT)?;
                screen.draw_text(value_x, value_y, scale, value)?;
                screen.draw_line(0, config.bar_row, *bar_end, config.bar_row)?;
            }
        }
        screen.flush().await
    }
}

/// Bar end for a distance
///
/// Whole centimeters are scaled with integer division, so 3.9 cm and 3.0 cm
/// draw the same bar.
fn bar_length(distance: Distance, config: &RangingConfig) -> i32 {
    let last_column = i64::from(config.display_width.saturating_sub(1));
    let whole_cm = i64::from(distance.cm() as i32);
    let full_scale = i64::from(config.max_range_cm as i32);
    (whole_cm * last_column)
        .checked_div(full_scale)
        .and_then(|end| i32::try_from(end).ok())
        .unwrap_or(0)
}

/// Result of one render cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// No sample within the render wait
    TimedOut,
    /// Signalled, but the distance had not been computed yet
    MissedFrame,
    /// Frame drawn and flushed
    Rendered { distance: Distance, frame: Frame },
}

/// Runs one render cycle
///
/// Waits up to `config.render_wait` for the sample ready signal, then draws
/// the newest queued distance. Display errors are handed back to the caller;
/// the queues are left consistent either way.
pub async fn render_next<M: RawMutex, S: Screen>(
    channels: &RangingChannels<M>,
    screen: &mut S,
    config: &RangingConfig,
) -> Result<RenderOutcome, S::Error> {
    if !channels.wait_sample_ready(config.render_wait).await {
        return Ok(RenderOutcome::TimedOut);
    }

    let Some(distance) = channels.latest_distance() else {
        return Ok(RenderOutcome::MissedFrame);
    };

    let frame = Frame::compose(distance, config);
    frame.draw(screen, config).await?;
    Ok(RenderOutcome::Rendered { distance, frame })
}
