//! Surface - Pixel grid over caller-owned memory
//!
//! A Surface borrows a region of [`Pixel`]s and interprets the first
//! `width * height` of them as a row-major grid. The region itself belongs
//! to the caller: rebinding hands the previous region back and nothing is
//! ever freed here.
//!
//! Every drawing primitive validates all the pixels it would touch before
//! writing any of them, so a rejected call leaves the surface unchanged.

use core::fmt;

use crate::blit::{linear_copy, BlockCopy};
use crate::font::Font;
use crate::pixel::Pixel;
use crate::{GraphicsError, PixelFormat};

/// A drawable pixel grid bound to external storage.
pub struct Surface<'a> {
    /// Bound pixel region (may be longer than the grid).
    pixels: &'a mut [Pixel],
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Pixel format.
    format: PixelFormat,
}

impl<'a> Surface<'a> {
    /// Bind a surface to a pixel region. The region is not cleared.
    pub fn bind(
        pixels: &'a mut [Pixel],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, GraphicsError> {
        let required = grid_len(width, height)?;
        check_storage(pixels, required)?;

        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    /// Bind a surface to a region of packed RGB565 words.
    pub fn from_words(
        words: &'a mut [u16],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, GraphicsError> {
        Self::bind(bytemuck::cast_slice_mut(words), width, height, format)
    }

    /// Rebind to a new region of the same size, returning the old one.
    pub fn rebind(&mut self, pixels: &'a mut [Pixel]) -> Result<&'a mut [Pixel], GraphicsError> {
        check_storage(pixels, self.len())?;
        Ok(core::mem::replace(&mut self.pixels, pixels))
    }

    /// Get the width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false: bound surfaces have a non-zero extent.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the grid in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * self.format.bytes_per_pixel()
    }

    /// Address of the first pixel.
    pub fn base_address(&self) -> usize {
        self.pixels.as_ptr() as usize
    }

    /// Grid pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        let len = self.len();
        &self.pixels[..len]
    }

    /// Mutable grid pixels in row-major order.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        let len = self.len();
        &mut self.pixels[..len]
    }

    /// Grid contents as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize, GraphicsError> {
        if x >= self.width || y >= self.height {
            return Err(GraphicsError::OutOfBounds { x, y });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Get pixel at coordinates.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Pixel, GraphicsError> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    /// Get a mutable reference to the pixel at coordinates.
    pub fn pixel_at_mut(&mut self, x: u32, y: u32) -> Result<&mut Pixel, GraphicsError> {
        let idx = self.index(x, y)?;
        Ok(&mut self.pixels[idx])
    }

    /// Set pixel at coordinates.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Pixel) -> Result<(), GraphicsError> {
        *self.pixel_at_mut(x, y)? = color;
        Ok(())
    }

    /// Fill the whole grid with a color.
    pub fn clear(&mut self, color: Pixel) {
        self.pixels_mut().fill(color);
    }

    /// Fill the rectangle `[x, x + width) x [y, y + height)`.
    pub fn fill_rectangle(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Pixel,
    ) -> Result<(), GraphicsError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        // The bottom-right corner bounds every other pixel.
        self.index(x.saturating_add(width - 1), y.saturating_add(height - 1))?;

        for row in y..y + height {
            let start = self.index(x, row)?;
            self.pixels[start..start + width as usize].fill(color);
        }
        Ok(())
    }

    /// Draw one glyph with its top-left corner at (`x`, `y`).
    ///
    /// Only set bits are written; the background shows through zero bits.
    pub fn draw_glyph(
        &mut self,
        code: u8,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
    ) -> Result<(), GraphicsError> {
        self.check_glyph(code, x, y, font)?;
        self.write_glyph(code, x, y, font, color)
    }

    /// Draw a string with fixed-pitch layout, `font.width()` per character.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
    ) -> Result<(), GraphicsError> {
        for (idx, code) in text.bytes().enumerate() {
            self.check_glyph(code, pen_x(x, idx, font), y, font)?;
        }
        for (idx, code) in text.bytes().enumerate() {
            self.write_glyph(code, pen_x(x, idx, font), y, font, color)?;
        }
        Ok(())
    }

    fn check_glyph(&self, code: u8, x: u32, y: u32, font: &Font<'_>) -> Result<(), GraphicsError> {
        let glyph = font.glyph(code)?;
        for (dx, dy) in glyph.set_bits() {
            self.index(x.saturating_add(dx), y.saturating_add(dy))?;
        }
        Ok(())
    }

    fn write_glyph(
        &mut self,
        code: u8,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
    ) -> Result<(), GraphicsError> {
        let glyph = font.glyph(code)?;
        for (dx, dy) in glyph.set_bits() {
            let idx = self.index(x + dx, y + dy)?;
            self.pixels[idx] = color;
        }
        Ok(())
    }

    /// Copy the full contents of `other` into this surface.
    ///
    /// With an accelerator the copy is delegated to it and this call blocks
    /// until the engine reports completion; otherwise a linear copy is made.
    pub fn copy_from(
        &mut self,
        other: &Surface<'_>,
        accelerator: Option<&mut dyn BlockCopy>,
    ) -> Result<(), GraphicsError> {
        if self.width != other.width || self.height != other.height || self.format != other.format
        {
            return Err(GraphicsError::SizeMismatch);
        }

        let (width, height) = (self.width, self.height);
        let src = other.pixels();
        let dst = self.pixels_mut();

        match accelerator {
            Some(engine) => {
                engine.start_copy(src, dst, width, height);
                engine.wait_for_completion();
            }
            None => linear_copy(dst, src),
        }
        Ok(())
    }
}

impl fmt::Debug for Surface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("base_address", &format_args!("{:#x}", self.base_address()))
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

fn grid_len(width: u32, height: u32) -> Result<usize, GraphicsError> {
    if width == 0 || height == 0 {
        return Err(GraphicsError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(GraphicsError::InvalidDimensions { width, height })
}

fn check_storage(pixels: &[Pixel], required: usize) -> Result<(), GraphicsError> {
    if pixels.len() < required {
        return Err(GraphicsError::StorageTooSmall {
            required,
            provided: pixels.len(),
        });
    }
    Ok(())
}

#[inline]
fn pen_x(x: u32, idx: usize, font: &Font<'_>) -> u32 {
    x.saturating_add((idx as u32).saturating_mul(font.advance()))
}
