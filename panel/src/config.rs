//! Panel configuration constants.
//!
//! Compile-time geometry and timing of the ILI9341 panel, plus the runtime
//! [`PanelConfig`] a driver is built with.

/// Panel width in pixels.
pub const LCD_WIDTH: u32 = 240;

/// Panel height in pixels.
pub const LCD_HEIGHT: u32 = 320;

/// Bytes per RGB565 pixel.
pub const PIXEL_BYTE_COUNT: usize = 2;

/// Number of frame buffers a driver can use.
pub const FRAME_BUFFER_COUNT: usize = 2;

/// Pixels in one full frame.
pub const FRAME_PIXELS: usize = (LCD_WIDTH * LCD_HEIGHT) as usize;

/// Bytes in one full frame (150 KB).
pub const FRAME_BYTES: usize = FRAME_PIXELS * PIXEL_BYTE_COUNT;

/// Settle time after the first GRAM write command, in milliseconds.
pub const GRAM_SETTLE_MS: u32 = 200;

/// Wake-up time after SLEEP OUT, in milliseconds.
pub const SLEEP_OUT_DELAY_MS: u32 = 200;

/// Display layer the visible frame buffer is bound to.
pub const DEFAULT_LAYER: u32 = 0;

/// Runtime panel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Display layer for the visible frame buffer.
    pub layer: u32,
    /// Window origin X on the display.
    pub origin_x: u32,
    /// Window origin Y on the display.
    pub origin_y: u32,
}

impl PanelConfig {
    /// Full-screen portrait window on layer 0.
    pub const PORTRAIT: PanelConfig = PanelConfig {
        width: LCD_WIDTH,
        height: LCD_HEIGHT,
        layer: DEFAULT_LAYER,
        origin_x: 0,
        origin_y: 0,
    };

    /// Pixels in one frame of this configuration.
    pub const fn frame_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes in one frame of this configuration.
    pub const fn frame_bytes(&self) -> usize {
        self.frame_pixels() * PIXEL_BYTE_COUNT
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::PORTRAIT
    }
}
