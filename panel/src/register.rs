//! ILI9341 command set.

use bitflags::bitflags;

/// ILI9341 command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    // Level 1 commands
    /// Software reset.
    SoftwareReset = 0x01,
    /// Read display identification information.
    ReadDisplayId = 0x04,
    /// Read display status.
    ReadDisplayStatus = 0x09,
    /// Enter sleep mode.
    SleepIn = 0x10,
    /// Sleep out.
    SleepOut = 0x11,
    /// Partial mode on.
    PartialModeOn = 0x12,
    /// Normal display mode on.
    NormalModeOn = 0x13,
    /// Display inversion off.
    InversionOff = 0x20,
    /// Display inversion on.
    InversionOn = 0x21,
    /// Gamma curve select.
    Gamma = 0x26,
    /// Display off.
    DisplayOff = 0x28,
    /// Display on.
    DisplayOn = 0x29,
    /// Column address set.
    ColumnAddress = 0x2A,
    /// Page address set.
    PageAddress = 0x2B,
    /// Memory write (GRAM).
    Gram = 0x2C,
    /// Color set.
    RgbSet = 0x2D,
    /// Memory read.
    MemoryRead = 0x2E,
    /// Partial area.
    PartialArea = 0x30,
    /// Vertical scrolling definition.
    VerticalScrollDefinition = 0x33,
    /// Tearing effect line off.
    TearingOff = 0x34,
    /// Tearing effect line on.
    TearingOn = 0x35,
    /// Memory access control.
    MemoryAccessControl = 0x36,
    /// Vertical scrolling start address.
    VerticalScrollStart = 0x37,
    /// Idle mode off.
    IdleModeOff = 0x38,
    /// Idle mode on.
    IdleModeOn = 0x39,
    /// Pixel format set.
    PixelFormat = 0x3A,
    /// Write memory continue.
    WriteMemoryContinue = 0x3C,
    /// Read memory continue.
    ReadMemoryContinue = 0x3E,
    /// Set tear scanline.
    SetTearScanline = 0x44,
    /// Get scanline.
    GetScanline = 0x45,
    /// Write display brightness.
    WriteBrightness = 0x51,
    /// Read display brightness.
    ReadBrightness = 0x52,
    /// Write CTRL display.
    WriteCtrlDisplay = 0x53,
    /// Read CTRL display.
    ReadCtrlDisplay = 0x54,
    /// Write content adaptive brightness control.
    WriteCabc = 0x55,
    /// Read content adaptive brightness control.
    ReadCabc = 0x56,
    /// Write CABC minimum brightness.
    WriteCabcMinimum = 0x5E,
    /// Read CABC minimum brightness.
    ReadCabcMinimum = 0x5F,
    /// Read ID1.
    ReadId1 = 0xDA,
    /// Read ID2.
    ReadId2 = 0xDB,
    /// Read ID3.
    ReadId3 = 0xDC,

    // Level 2 commands
    /// RGB interface signal control.
    RgbInterface = 0xB0,
    /// Frame rate control (normal mode).
    FrameRateNormal = 0xB1,
    /// Frame rate control (idle mode).
    FrameRateIdle = 0xB2,
    /// Frame rate control (partial mode).
    FrameRatePartial = 0xB3,
    /// Display inversion control.
    InversionControl = 0xB4,
    /// Blanking porch control.
    BlankingPorch = 0xB5,
    /// Display function control.
    DisplayFunction = 0xB6,
    /// Entry mode set.
    EntryMode = 0xB7,
    /// Power control 1.
    Power1 = 0xC0,
    /// Power control 2.
    Power2 = 0xC1,
    /// VCOM control 1.
    Vcom1 = 0xC5,
    /// VCOM control 2.
    Vcom2 = 0xC7,
    /// NV memory write.
    NvMemoryWrite = 0xD0,
    /// NV memory protection key.
    NvMemoryKey = 0xD1,
    /// NV memory status read.
    NvMemoryStatus = 0xD2,
    /// Read ID4.
    ReadId4 = 0xD3,
    /// Positive gamma correction.
    PositiveGamma = 0xE0,
    /// Negative gamma correction.
    NegativeGamma = 0xE1,
    /// Digital gamma control 1.
    DigitalGamma1 = 0xE2,
    /// Digital gamma control 2.
    DigitalGamma2 = 0xE3,
    /// Interface control.
    Interface = 0xF6,

    // Extended commands
    /// Vendor power control (undocumented, required on some panels).
    VendorPower = 0xCA,
    /// Power control A.
    PowerA = 0xCB,
    /// Power control B.
    PowerB = 0xCF,
    /// Driver timing control A.
    DriverTimingA = 0xE8,
    /// Driver timing control B.
    DriverTimingB = 0xEA,
    /// Power on sequence control.
    PowerSequence = 0xED,
    /// Enable 3 gamma.
    Gamma3Enable = 0xF2,
    /// Pump ratio control.
    PumpRatio = 0xF7,
}

impl Register {
    /// Command byte sent on the bus.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register.code()
    }
}

bitflags! {
    /// Memory access control (MADCTL) bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryAccess: u8 {
        /// Row address order.
        const MY = 0x80;
        /// Column address order.
        const MX = 0x40;
        /// Row/column exchange.
        const MV = 0x20;
        /// Vertical refresh order.
        const ML = 0x10;
        /// BGR color filter panel.
        const BGR = 0x08;
        /// Horizontal refresh order.
        const MH = 0x04;
    }
}

impl MemoryAccess {
    /// Orientation used at bring-up.
    pub const DEFAULT: MemoryAccess = MemoryAccess::MY
        .union(MemoryAccess::MX)
        .union(MemoryAccess::BGR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(Register::SleepOut.code(), 0x11);
        assert_eq!(u8::from(Register::Gram), 0x2C);
        assert_eq!(Register::PumpRatio.code(), 0xF7);
    }

    #[test]
    fn test_default_orientation() {
        assert_eq!(MemoryAccess::DEFAULT.bits(), 0xC8);
        assert!(!MemoryAccess::DEFAULT.contains(MemoryAccess::MV));
    }
}
