//! Fixed-width bitmap fonts.
//!
//! A font table stores one bitmap per printable character, starting at the
//! space character. Each glyph is `height` rows of `ceil(width / 8)` bytes,
//! most significant bit first. Tables are borrowed and never modified.

use crate::GraphicsError;

/// First character code present in a font table.
pub const FIRST_PRINTABLE: u8 = b' ';

const BYTE_BIT_COUNT: u32 = 8;

/// Borrowed bitmap font table.
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    table: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Font<'a> {
    /// Create a font over a glyph table.
    pub const fn new(table: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            table,
            width,
            height,
        }
    }

    /// Glyph width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Glyph height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal cursor advance per character.
    pub const fn advance(&self) -> u32 {
        self.width
    }

    /// Bytes per glyph row.
    pub const fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(BYTE_BIT_COUNT) as usize
    }

    /// Bytes per glyph bitmap, saturating at `usize::MAX`.
    pub const fn bytes_per_glyph(&self) -> usize {
        self.bytes_per_row().saturating_mul(self.height as usize)
    }

    /// Number of complete glyphs in the table.
    pub fn glyph_count(&self) -> usize {
        match self.bytes_per_glyph() {
            0 => 0,
            size => self.table.len() / size,
        }
    }

    /// Look up the glyph for a character code.
    pub fn glyph(&self, code: u8) -> Result<Glyph<'a>, GraphicsError> {
        let index = code
            .checked_sub(FIRST_PRINTABLE)
            .ok_or(GraphicsError::GlyphOutOfRange { code })? as usize;
        let size = self.bytes_per_glyph();
        let bitmap = index
            .checked_mul(size)
            .and_then(|start| Some(start..start.checked_add(size)?))
            .and_then(|range| self.table.get(range))
            .ok_or(GraphicsError::GlyphOutOfRange { code })?;

        Ok(Glyph {
            bitmap,
            bytes_per_row: self.bytes_per_row(),
        })
    }

    /// Width in pixels of a string laid out with this font.
    ///
    /// Saturates at `u32::MAX`.
    pub fn text_width(&self, text: &str) -> u32 {
        u32::try_from(text.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(self.width)
    }
}

/// One glyph bitmap borrowed from a font table.
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    bitmap: &'a [u8],
    bytes_per_row: usize,
}

impl<'a> Glyph<'a> {
    /// Raw bitmap bytes.
    pub fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    /// Offsets `(dx, dy)` of every set bit, relative to the glyph origin.
    ///
    /// Padding bits at the end of a row are reported like any other bit.
    pub fn set_bits(&self) -> impl Iterator<Item = (u32, u32)> + 'a {
        let bytes_per_row = self.bytes_per_row;
        self.bitmap
            .iter()
            .enumerate()
            .flat_map(move |(idx, &byte)| {
                let column = ((idx % bytes_per_row) as u32) * BYTE_BIT_COUNT;
                let row = (idx / bytes_per_row) as u32;
                (0..BYTE_BIT_COUNT)
                    .filter(move |bit| byte & (0x80u8 >> bit) != 0)
                    .map(move |bit| (column + bit, row))
            })
    }
}
