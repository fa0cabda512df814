//! SSD1306 display adapter
//!
//! Implements the render step's [`Screen`] on top of the buffered async
//! SSD1306 driver, drawing with embedded-graphics.

use defmt::Format;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_9X18_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};
use ranger_core::Screen;
use ssd1306::{mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};

/// I2C-backed SSD1306 128x32 in buffered async graphics mode
type OledDisplay = Ssd1306Async<
    I2CInterface<I2c<'static, I2C0, Async>>,
    DisplaySize128x32,
    BufferedGraphicsModeAsync<DisplaySize128x32>,
>;

/// Display failures, by operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ScreenError {
    /// Controller did not accept the init sequence
    Init,
    /// Drawing into the frame buffer failed
    Draw,
    /// Frame buffer transfer failed
    Flush,
}

/// The OLED readout
pub struct Oled {
    display: OledDisplay,
}

impl Oled {
    pub fn new(i2c: I2c<'static, I2C0, Async>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306Async::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self { display }
    }
}

/// Font for a glyph scale; 1 is the smallest
fn font(scale: u8) -> &'static MonoFont<'static> {
    match scale {
        0 | 1 => &FONT_6X10,
        2 => &FONT_9X18_BOLD,
        _ => &FONT_10X20,
    }
}

impl Screen for Oled {
    type Error = ScreenError;

    async fn init(&mut self) -> Result<(), ScreenError> {
        self.display.init().await.map_err(|_| ScreenError::Init)
    }

    fn clear_buffer(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, x: i32, y: i32, scale: u8, text: &str) -> Result<(), ScreenError> {
        let style = MonoTextStyle::new(font(scale), BinaryColor::On);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.display)
            .map(|_| ())
            .map_err(|_| ScreenError::Draw)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), ScreenError> {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.display)
            .map_err(|_| ScreenError::Draw)
    }

    async fn flush(&mut self) -> Result<(), ScreenError> {
        self.display.flush().await.map_err(|_| ScreenError::Flush)
    }
}
