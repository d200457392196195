//! RGB565 pixel value.
//!
//! A pixel is a plain 16-bit integer. Channels are packed from the least
//! significant bit upwards as 5 bits blue, 6 bits green and 5 bits red;
//! the three-channel view is derived with shifts and masks.

use bytemuck::{Pod, Zeroable};

const BLUE_SHIFT: u16 = 0;
const GREEN_SHIFT: u16 = 5;
const RED_SHIFT: u16 = 11;

const BLUE_MASK: u16 = 0x1F;
const GREEN_MASK: u16 = 0x3F;
const RED_MASK: u16 = 0x1F;

/// A 16-bit packed RGB565 color.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Pixel(u16);

impl Pixel {
    /// Largest value of the red channel.
    pub const RED_MAX: u8 = RED_MASK as u8;
    /// Largest value of the green channel.
    pub const GREEN_MAX: u8 = GREEN_MASK as u8;
    /// Largest value of the blue channel.
    pub const BLUE_MAX: u8 = BLUE_MASK as u8;

    pub const BLACK: Pixel = Pixel(0x0000);
    pub const WHITE: Pixel = Pixel(0xFFFF);
    pub const RED: Pixel = Pixel::new(Self::RED_MAX, 0, 0);
    pub const GREEN: Pixel = Pixel::new(0, Self::GREEN_MAX, 0);
    pub const BLUE: Pixel = Pixel::new(0, 0, Self::BLUE_MAX);
    pub const YELLOW: Pixel = Pixel::new(Self::RED_MAX, Self::GREEN_MAX, 0);
    pub const CYAN: Pixel = Pixel::new(0, Self::GREEN_MAX, Self::BLUE_MAX);
    pub const MAGENTA: Pixel = Pixel::new(Self::RED_MAX, 0, Self::BLUE_MAX);

    /// Build a pixel from channel values.
    ///
    /// Each channel is truncated to its field width, so out-of-range
    /// values wrap rather than bleed into a neighbouring channel.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Pixel(
            ((red as u16 & RED_MASK) << RED_SHIFT)
                | ((green as u16 & GREEN_MASK) << GREEN_SHIFT)
                | ((blue as u16 & BLUE_MASK) << BLUE_SHIFT),
        )
    }

    /// Wrap a packed RGB565 value.
    pub const fn from_raw(value: u16) -> Self {
        Pixel(value)
    }

    /// The packed RGB565 value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel (0..=31).
    pub const fn red(self) -> u8 {
        ((self.0 >> RED_SHIFT) & RED_MASK) as u8
    }

    /// Green channel (0..=63).
    pub const fn green(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & GREEN_MASK) as u8
    }

    /// Blue channel (0..=31).
    pub const fn blue(self) -> u8 {
        ((self.0 >> BLUE_SHIFT) & BLUE_MASK) as u8
    }

    /// Channels as `(red, green, blue)`.
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.red(), self.green(), self.blue())
    }

    /// Replace the red channel.
    pub const fn with_red(self, red: u8) -> Self {
        Pixel::new(red, self.green(), self.blue())
    }

    /// Replace the green channel.
    pub const fn with_green(self, green: u8) -> Self {
        Pixel::new(self.red(), green, self.blue())
    }

    /// Replace the blue channel.
    pub const fn with_blue(self, blue: u8) -> Self {
        Pixel::new(self.red(), self.green(), blue)
    }
}

impl From<u16> for Pixel {
    fn from(value: u16) -> Self {
        Pixel(value)
    }
}

impl From<Pixel> for u16 {
    fn from(pixel: Pixel) -> Self {
        pixel.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_channel_layout() {
        assert_eq!(Pixel::BLUE.raw(), 0x001F);
        assert_eq!(Pixel::GREEN.raw(), 0x07E0);
        assert_eq!(Pixel::RED.raw(), 0xF800);
        assert_eq!(Pixel::new(31, 63, 31), Pixel::WHITE);
        assert_eq!(Pixel::default(), Pixel::BLACK);
    }

    #[test]
    fn test_channels_truncate_to_field_width() {
        // 0x20 does not fit in five bits: only the low bits survive.
        let pixel = Pixel::new(0x21, 0x40, 0xFF);
        assert_eq!(pixel.red(), 0x01);
        assert_eq!(pixel.green(), 0x00);
        assert_eq!(pixel.blue(), 0x1F);
    }

    #[test]
    fn test_with_channel_keeps_others() {
        let pixel = Pixel::new(3, 40, 17).with_green(5);
        assert_eq!(pixel.channels(), (3, 5, 17));
    }

    #[test]
    fn test_raw_conversions() {
        let pixel = Pixel::from(0xBEEF);
        assert_eq!(u16::from(pixel), 0xBEEF);
        assert_eq!(Pixel::from_raw(pixel.raw()), pixel);
    }

    proptest! {
        #[test]
        fn prop_channels_round_trip(r in 0u8..=31, g in 0u8..=63, b in 0u8..=31) {
            let pixel = Pixel::new(r, g, b);
            prop_assert_eq!(pixel.channels(), (r, g, b));
        }

        #[test]
        fn prop_packed_value_round_trip(value in any::<u16>()) {
            let pixel = Pixel::from_raw(value);
            let (r, g, b) = pixel.channels();
            prop_assert_eq!(Pixel::new(r, g, b).raw(), value);
        }
    }
}
