//! Output window binding.
//!
//! The display engine scans one memory region out to the panel. A
//! [`LayerBinder`] tells it which surface that is. Binding failures are
//! configuration errors: rendering cannot continue without a valid window.

use core::fmt;

use crate::surface::Surface;
use crate::PixelFormat;

/// Display engine capability that selects the visible memory region.
pub trait LayerBinder {
    /// Bind `surface` to display `layer` with its top-left corner at
    /// (`origin_x`, `origin_y`).
    fn bind_window(
        &mut self,
        layer: u32,
        surface: &Surface<'_>,
        origin_x: u32,
        origin_y: u32,
    ) -> Result<(), LayerError>;
}

impl<T: LayerBinder + ?Sized> LayerBinder for &mut T {
    fn bind_window(
        &mut self,
        layer: u32,
        surface: &Surface<'_>,
        origin_x: u32,
        origin_y: u32,
    ) -> Result<(), LayerError> {
        (**self).bind_window(layer, surface, origin_x, origin_y)
    }
}

/// Reason a display engine refused a layer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// Layer index not supported by the display engine.
    InvalidLayer,
    /// Window does not fit the active display area.
    InvalidWindow,
    /// Display engine reported a hardware fault.
    HardwareError,
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerError::InvalidLayer => write!(f, "unsupported layer"),
            LayerError::InvalidWindow => write!(f, "window outside the display area"),
            LayerError::HardwareError => write!(f, "display engine fault"),
        }
    }
}

/// Layer register values describing one visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerWindow {
    /// First visible column.
    pub window_x0: u32,
    /// Column one past the last visible one.
    pub window_x1: u32,
    /// First visible row.
    pub window_y0: u32,
    /// Row one past the last visible one.
    pub window_y1: u32,
    /// Start address of the pixel region.
    pub start_address: usize,
    /// Pixel format of the region.
    pub format: PixelFormat,
    /// Constant layer alpha.
    pub alpha: u8,
    /// Image width in pixels.
    pub image_width: u32,
    /// Image height in pixels.
    pub image_height: u32,
}

impl LayerWindow {
    /// Opaque layer alpha.
    pub const OPAQUE: u8 = 255;

    /// Window covering `surface` placed at (`origin_x`, `origin_y`).
    pub fn for_surface(surface: &Surface<'_>, origin_x: u32, origin_y: u32) -> Self {
        Self {
            window_x0: origin_x,
            window_x1: origin_x.saturating_add(surface.width()),
            window_y0: origin_y,
            window_y1: origin_y.saturating_add(surface.height()),
            start_address: surface.base_address(),
            format: surface.format(),
            alpha: Self::OPAQUE,
            image_width: surface.width(),
            image_height: surface.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;

    #[test]
    fn test_window_for_surface() {
        let mut storage = [Pixel::BLACK; 12];
        let surface = Surface::bind(&mut storage, 4, 3, PixelFormat::Rgb565).unwrap();
        let window = LayerWindow::for_surface(&surface, 10, 20);

        assert_eq!(window.window_x0, 10);
        assert_eq!(window.window_x1, 14);
        assert_eq!(window.window_y0, 20);
        assert_eq!(window.window_y1, 23);
        assert_eq!(window.image_width, 4);
        assert_eq!(window.image_height, 3);
        assert_eq!(window.alpha, LayerWindow::OPAQUE);
        assert_eq!(window.format, PixelFormat::Rgb565);
        assert_eq!(window.start_address, surface.base_address());
    }
}
