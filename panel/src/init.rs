//! ILI9341 bring-up sequence.
//!
//! Register values follow the STMicroelectronics reference driver for the
//! panel on the STM32F429I-DISC1 board, running the controller in RGB
//! interface mode so the display engine streams frames from memory.

use embedded_hal::delay::DelayNs;

use crate::bus::PanelBus;
use crate::config::{GRAM_SETTLE_MS, SLEEP_OUT_DELAY_MS};
use crate::register::{MemoryAccess, Register};

/// One step of the bring-up table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Command followed by parameter bytes.
    Write(Register, &'static [u8]),
    /// Pause in milliseconds.
    Delay(u32),
}

const MADCTL: [u8; 1] = [MemoryAccess::DEFAULT.bits()];

/// Register table executed at bring-up.
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::Write(Register::VendorPower, &[0xC3, 0x08, 0x50]),
    InitStep::Write(Register::PowerB, &[0x00, 0xC1, 0x30]),
    InitStep::Write(Register::PowerSequence, &[0x64, 0x03, 0x12, 0x81]),
    InitStep::Write(Register::DriverTimingA, &[0x85, 0x00, 0x78]),
    InitStep::Write(Register::PowerA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    InitStep::Write(Register::PumpRatio, &[0x20]),
    InitStep::Write(Register::DriverTimingB, &[0x00, 0x00]),
    // 70 Hz
    InitStep::Write(Register::FrameRateNormal, &[0x00, 0x1B]),
    InitStep::Write(Register::DisplayFunction, &[0x0A, 0xA2]),
    InitStep::Write(Register::Power1, &[0x10]),
    InitStep::Write(Register::Power2, &[0x10]),
    InitStep::Write(Register::Vcom1, &[0x45, 0x15]),
    InitStep::Write(Register::Vcom2, &[0x90]),
    InitStep::Write(Register::MemoryAccessControl, &MADCTL),
    InitStep::Write(Register::Gamma3Enable, &[0x00]),
    InitStep::Write(Register::RgbInterface, &[0xC2]),
    InitStep::Write(Register::DisplayFunction, &[0x0A, 0xA7, 0x27, 0x04]),
    // Columns 0..=239, pages 0..=319.
    InitStep::Write(Register::ColumnAddress, &[0x00, 0x00, 0x00, 0xEF]),
    InitStep::Write(Register::PageAddress, &[0x00, 0x00, 0x01, 0x3F]),
    InitStep::Write(Register::Interface, &[0x01, 0x00, 0x06]),
    InitStep::Write(Register::Gram, &[]),
    InitStep::Delay(GRAM_SETTLE_MS),
    InitStep::Write(Register::Gamma, &[0x01]),
    InitStep::Write(
        Register::PositiveGamma,
        &[
            0x0F, 0x29, 0x24, 0x0C, 0x0E, 0x09, 0x4E, 0x78, 0x3C, 0x09, 0x13, 0x05, 0x17, 0x11,
            0x00,
        ],
    ),
    InitStep::Write(
        Register::NegativeGamma,
        &[
            0x00, 0x16, 0x1B, 0x04, 0x11, 0x07, 0x31, 0x33, 0x42, 0x05, 0x0C, 0x0A, 0x28, 0x2F,
            0x0F,
        ],
    ),
    InitStep::Write(Register::SleepOut, &[]),
    InitStep::Delay(SLEEP_OUT_DELAY_MS),
    InitStep::Write(Register::DisplayOn, &[]),
    InitStep::Write(Register::Gram, &[]),
];

/// Run [`INIT_SEQUENCE`] on the bus.
pub fn run_init_sequence<B, D>(bus: &mut B, delay: &mut D) -> Result<(), B::Error>
where
    B: PanelBus + ?Sized,
    D: DelayNs + ?Sized,
{
    for step in INIT_SEQUENCE {
        match *step {
            InitStep::Write(register, data) => {
                log::debug!("ili9341: {:?} {:02x?}", register, data);
                bus.write_register(register, data)?;
            }
            InitStep::Delay(ms) => delay.delay_ms(ms),
        }
    }
    log::info!("ili9341: {} bring-up steps done", INIT_SEQUENCE.len());
    Ok(())
}
