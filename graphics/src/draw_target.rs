//! embedded-graphics interop.
//!
//! Lets `embedded-graphics` primitives, fonts and images render straight
//! into a [`Surface`]. Pixels outside the surface are skipped, as the
//! `DrawTarget` contract requires.

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::raw::RawU16;
use embedded_graphics_core::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics_core::Pixel as EgPixel;

use crate::pixel::Pixel;
use crate::surface::Surface;

impl From<Rgb565> for Pixel {
    fn from(color: Rgb565) -> Self {
        Pixel::from_raw(color.into_storage())
    }
}

impl From<Pixel> for Rgb565 {
    fn from(pixel: Pixel) -> Self {
        Rgb565::from(RawU16::new(pixel.raw()))
    }
}

impl DrawTarget for Surface<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = EgPixel<Self::Color>>,
    {
        for EgPixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            // Out-of-bounds points are clipped, not reported.
            let _ = self.set_pixel(point.x as u32, point.y as u32, color.into());
        }
        Ok(())
    }
}

impl OriginDimensions for Surface<'_> {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}
