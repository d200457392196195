//! Command/data bus to the panel controller.
//!
//! The controller distinguishes command bytes from parameter bytes with a
//! data/command (D/C) line. [`SpiPanelBus`] drives that line through an
//! `embedded-hal` output pin and sends each byte over an SPI device, which
//! handles chip select itself.

use core::fmt;

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::register::Register;

/// Byte-oriented command/data channel to the controller.
pub trait PanelBus {
    /// Bus failure.
    type Error;

    /// Send one command byte.
    fn write_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send one parameter byte.
    fn write_data(&mut self, data: u8) -> Result<(), Self::Error>;

    /// Send a command followed by its parameter bytes.
    fn write_register(&mut self, register: Register, data: &[u8]) -> Result<(), Self::Error> {
        self.write_command(register.code())?;
        for &param in data {
            self.write_data(param)?;
        }
        Ok(())
    }
}

impl<T: PanelBus + ?Sized> PanelBus for &mut T {
    type Error = T::Error;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        (**self).write_command(command)
    }

    fn write_data(&mut self, data: u8) -> Result<(), Self::Error> {
        (**self).write_data(data)
    }
}

/// Error from [`SpiPanelBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError<SpiE, PinE> {
    /// SPI transfer failed.
    Spi(SpiE),
    /// D/C line could not be driven.
    Pin(PinE),
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for BusError<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Spi(err) => write!(f, "SPI transfer failed: {:?}", err),
            BusError::Pin(err) => write!(f, "D/C line failed: {:?}", err),
        }
    }
}

/// Four-wire SPI bus: SPI device plus a D/C pin (low = command).
pub struct SpiPanelBus<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiPanelBus<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    /// Create a bus from an SPI device and the D/C pin.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Release the SPI device and pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    fn send(&mut self, byte: u8) -> Result<(), BusError<SPI::Error, DC::Error>> {
        self.spi.write(&[byte]).map_err(BusError::Spi)
    }
}

impl<SPI, DC> PanelBus for SpiPanelBus<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    type Error = BusError<SPI::Error, DC::Error>;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(BusError::Pin)?;
        self.send(command)
    }

    fn write_data(&mut self, data: u8) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(BusError::Pin)?;
        self.send(data)
    }
}
