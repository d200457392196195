//! TFT-LCD Graphics Core
//!
//! This crate provides the software-rendered pixel surface and the
//! double-buffered presentation engine used by the TFT panel drivers.
//! It never allocates: every pixel region is owned by the caller and
//! merely borrowed by a [`Surface`].
//!
//! # Architecture
//!
//! The graphics core is organized into:
//!
//! - `pixel`: 16-bit RGB565 packed color value
//! - `surface`: pixel grid over caller-owned memory with rectangle and glyph rasterization
//! - `font`: fixed-width bitmap glyph tables
//! - `blit`: block-copy accelerator capability
//! - `layer`: output window binding capability
//! - `present`: front/back buffer coordinator and swap protocol
//! - `draw_target`: `embedded-graphics` interop (feature-gated)

#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod blit;
pub mod font;
pub mod layer;
pub mod pixel;
pub mod present;
pub mod surface;

#[cfg(feature = "embedded-graphics")]
pub mod draw_target;

use core::fmt;

pub use blit::{BlockCopy, NoAccelerator};
pub use font::{Font, Glyph, FIRST_PRINTABLE};
pub use layer::{LayerBinder, LayerError, LayerWindow};
pub use pixel::Pixel;
pub use present::{Presenter, Slot, Update};
pub use surface::Surface;

/// Graphics error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsError {
    /// A pixel coordinate lies outside the surface.
    OutOfBounds {
        /// Column of the offending pixel.
        x: u32,
        /// Row of the offending pixel.
        y: u32,
    },
    /// Character code has no glyph in the font table.
    GlyphOutOfRange {
        /// The rejected character code.
        code: u8,
    },
    /// Surface dimensions are zero or overflow the address space.
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Backing region holds fewer pixels than the surface needs.
    StorageTooSmall {
        /// Pixels required (`width * height`).
        required: usize,
        /// Pixels provided by the caller.
        provided: usize,
    },
    /// Two surfaces differ in size or pixel format.
    SizeMismatch,
    /// A back buffer was already configured.
    BackBufferAlreadyConfigured,
    /// The output window binder rejected a layer configuration.
    LayerRejected {
        /// Display layer that failed to bind.
        layer: u32,
    },
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::OutOfBounds { x, y } => {
                write!(f, "pixel ({}, {}) is outside the surface", x, y)
            }
            GraphicsError::GlyphOutOfRange { code } => {
                write!(f, "no glyph for character code {:#04x}", code)
            }
            GraphicsError::InvalidDimensions { width, height } => {
                write!(f, "invalid surface dimensions {}x{}", width, height)
            }
            GraphicsError::StorageTooSmall { required, provided } => write!(
                f,
                "pixel storage too small: {} pixels required, {} provided",
                required, provided
            ),
            GraphicsError::SizeMismatch => write!(f, "surfaces differ in size or format"),
            GraphicsError::BackBufferAlreadyConfigured => {
                write!(f, "back buffer is already configured")
            }
            GraphicsError::LayerRejected { layer } => {
                write!(f, "display layer {} rejected the window configuration", layer)
            }
        }
    }
}

/// Pixel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 16-bit RGB (5-6-5).
    #[default]
    Rgb565,
}

impl PixelFormat {
    /// Get bits per pixel.
    pub const fn bits_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Rgb565 => 16,
        }
    }

    /// Get bytes per pixel.
    pub const fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel() as usize + 7) / 8
    }
}
