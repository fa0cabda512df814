//! Distance readout
//!
//! Shows the newest distance on the OLED.
//!
//! # Display Layout (128x32)
//! ```text
//! Distancia:          <- label, row 0
//! 20.00 cm            <- value, row 10
//! ======              <- bar, row 27, full width at 400cm
//! ```
//! Out-of-range readings show "Falha" instead.
//!
//! # Timing
//! - Waits up to 500ms for a new sample, otherwise keeps the last frame
//! - A sample whose distance is not ready yet is skipped
//!
//! If the display does not come up, the task parks itself and the rest of the
//! firmware keeps measuring.

use defmt::{debug, info, trace, warn};
use embassy_rp::i2c::{self, I2c};
use ranger_core::render::render_next;
use ranger_core::{DropStats, RangingConfig, RenderOutcome, Screen};

use crate::system::channels::RANGING;
use crate::system::resources::{DisplayResources, Irqs, DISPLAY_I2C_FREQUENCY};
use crate::system::screen::Oled;

/// Render task
#[embassy_executor::task]
pub async fn render(r: DisplayResources) {
    info!("Initializing display driver");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_FREQUENCY;
    let i2c = I2c::new_async(r.i2c, r.scl_pin, r.sda_pin, Irqs, i2c_config);

    let mut screen = Oled::new(i2c);
    if let Err(e) = screen.init().await {
        warn!("Display init failed: {:?}, continuing without display", e);
        core::future::pending::<()>().await;
    }

    let config = RangingConfig::DEFAULT;
    let mut reported_drops = DropStats::default();

    loop {
        match render_next(&RANGING, &mut screen, &config).await {
            Ok(RenderOutcome::Rendered { distance, frame }) => {
                debug!("Rendered {} cm: {:?}", distance.cm(), frame);
            }
            Ok(RenderOutcome::MissedFrame) => {
                trace!("Sample signalled before its distance was ready");
            }
            Ok(RenderOutcome::TimedOut) => {}
            Err(e) => {
                warn!("Display update failed: {:?}", e);
            }
        }

        let drops = RANGING.drops();
        if drops != reported_drops {
            warn!("Samples dropped so far: {} ({:?})", drops.total(), drops);
            reported_drops = drops;
        }
    }
}
