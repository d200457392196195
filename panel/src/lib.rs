//! ILI9341 TFT panel driver
//!
//! Brings up an ILI9341 controller in RGB interface mode and drives it
//! through the double-buffered presentation engine of `tftlcd-graphics`.
//! The controller is configured once over its command bus; after that the
//! display engine scans frames straight from memory, so every draw is a
//! write into a caller-owned pixel region.
//!
//! # Architecture
//!
//! - `register`: controller command codes and MADCTL bits
//! - `bus`: command/data byte channel, with an SPI implementation
//! - `init`: fixed bring-up register table
//! - `config`: panel geometry and timing
//! - `shared`: lock-protected driver for use from several contexts

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod config;
pub mod init;
pub mod register;
pub mod shared;

use core::fmt;

use embedded_hal::delay::DelayNs;
use tftlcd_graphics::{
    BlockCopy, Font, GraphicsError, LayerBinder, NoAccelerator, Pixel, PixelFormat, Presenter,
    Surface, Update,
};

pub use bus::{BusError, PanelBus, SpiPanelBus};
pub use config::PanelConfig;
pub use init::{run_init_sequence, InitStep, INIT_SEQUENCE};
pub use register::{MemoryAccess, Register};
pub use shared::SharedPanel;

/// Panel driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError<E> {
    /// Command bus failure during bring-up.
    Bus(E),
    /// Surface or presentation failure.
    Graphics(GraphicsError),
}

impl<E> From<GraphicsError> for PanelError<E> {
    fn from(err: GraphicsError) -> Self {
        PanelError::Graphics(err)
    }
}

impl<E: fmt::Debug> fmt::Display for PanelError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::Bus(err) => write!(f, "panel bus error: {:?}", err),
            PanelError::Graphics(err) => write!(f, "{}", err),
        }
    }
}

/// ILI9341 panel with double-buffered presentation.
pub struct Ili9341<'a, B, L, A = NoAccelerator> {
    bus: B,
    config: PanelConfig,
    presenter: Presenter<'a, L, A>,
}

impl<'a, B: PanelBus, L: LayerBinder> Ili9341<'a, B, L, NoAccelerator> {
    /// Bring up the panel and start presenting from `front`.
    ///
    /// `front` must hold at least one frame of `config`. It is cleared to
    /// black and bound to the configured display layer.
    pub fn initialize<D: DelayNs>(
        mut bus: B,
        binder: L,
        delay: &mut D,
        config: PanelConfig,
        front: &'a mut [Pixel],
    ) -> Result<Self, PanelError<B::Error>> {
        run_init_sequence(&mut bus, delay).map_err(PanelError::Bus)?;
        let front = Surface::bind(front, config.width, config.height, PixelFormat::Rgb565)?;
        let presenter = Presenter::initialize_on_layer(
            binder,
            front,
            config.layer,
            config.origin_x,
            config.origin_y,
        )?;
        Ok(Self::finish(bus, config, presenter))
    }
}

impl<'a, B: PanelBus, L: LayerBinder, A: BlockCopy> Ili9341<'a, B, L, A> {
    /// Like [`Ili9341::initialize`], with a block-copy engine for frame
    /// synchronization.
    pub fn initialize_accelerated<D: DelayNs>(
        mut bus: B,
        binder: L,
        delay: &mut D,
        config: PanelConfig,
        front: &'a mut [Pixel],
        accelerator: A,
    ) -> Result<Self, PanelError<B::Error>> {
        run_init_sequence(&mut bus, delay).map_err(PanelError::Bus)?;
        let front = Surface::bind(front, config.width, config.height, PixelFormat::Rgb565)?;
        let presenter = Presenter::initialize_accelerated_on_layer(
            binder,
            front,
            accelerator,
            config.layer,
            config.origin_x,
            config.origin_y,
        )?;
        Ok(Self::finish(bus, config, presenter))
    }

    fn finish(bus: B, config: PanelConfig, presenter: Presenter<'a, L, A>) -> Self {
        log::info!(
            "ili9341: {}x{} panel ready on layer {}",
            config.width,
            config.height,
            config.layer
        );
        Ili9341 {
            bus,
            config,
            presenter,
        }
    }

    /// Enable double buffering with a second frame region.
    pub fn configure_back_buffer(&mut self, back: &'a mut [Pixel]) -> Result<(), GraphicsError> {
        let back = Surface::bind(back, self.config.width, self.config.height, PixelFormat::Rgb565)?;
        self.presenter.configure_back_buffer(back)
    }

    /// Fill a rectangle.
    pub fn fill_rectangle(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Pixel,
        update: Update,
    ) -> Result<(), GraphicsError> {
        self.presenter.fill_rectangle(x, y, width, height, color, update)
    }

    /// Draw a string.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
        update: Update,
    ) -> Result<(), GraphicsError> {
        self.presenter.draw_text(text, x, y, font, color, update)
    }

    /// Draw one character.
    pub fn draw_glyph(
        &mut self,
        code: u8,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
        update: Update,
    ) -> Result<(), GraphicsError> {
        self.presenter.draw_glyph(code, x, y, font, color, update)
    }

    /// Show the pending frame, if any.
    pub fn present_frame(&mut self) -> Result<bool, GraphicsError> {
        self.presenter.present_frame()
    }

    /// Presentation engine.
    pub fn presenter(&self) -> &Presenter<'a, L, A> {
        &self.presenter
    }

    /// Mutable presentation engine, for custom drawing via
    /// [`Presenter::draw_with`].
    pub fn presenter_mut(&mut self) -> &mut Presenter<'a, L, A> {
        &mut self.presenter
    }

    /// Configuration the panel was brought up with.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Command bus, for commands outside the bring-up table.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use tftlcd_graphics::{LayerError, LayerWindow, Slot};

    #[derive(Default)]
    struct CountingBus {
        commands: usize,
        fail: bool,
    }

    impl PanelBus for CountingBus {
        type Error = &'static str;

        fn write_command(&mut self, _command: u8) -> Result<(), Self::Error> {
            if self.fail {
                return Err("nack");
            }
            self.commands += 1;
            Ok(())
        }

        fn write_data(&mut self, _data: u8) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[derive(Default)]
    struct Windows(Vec<(u32, LayerWindow)>);

    impl LayerBinder for Windows {
        fn bind_window(
            &mut self,
            layer: u32,
            surface: &Surface<'_>,
            origin_x: u32,
            origin_y: u32,
        ) -> Result<(), LayerError> {
            self.0.push((layer, LayerWindow::for_surface(surface, origin_x, origin_y)));
            Ok(())
        }
    }

    const SMALL: PanelConfig = PanelConfig {
        width: 8,
        height: 4,
        layer: 0,
        origin_x: 0,
        origin_y: 0,
    };

    #[test]
    fn test_initialize_runs_bring_up() {
        let mut front = [Pixel::WHITE; 32];
        let panel = Ili9341::initialize(
            CountingBus::default(),
            Windows::default(),
            &mut NoDelay,
            SMALL,
            &mut front,
        )
        .unwrap();

        let writes = INIT_SEQUENCE
            .iter()
            .filter(|step| matches!(step, InitStep::Write(..)))
            .count();
        assert_eq!(panel.bus.commands, writes);
        assert_eq!(panel.config(), &SMALL);
        assert_eq!(panel.presenter().binder().0.len(), 1);
        assert!(panel
            .presenter()
            .visible_surface()
            .pixels()
            .iter()
            .all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn test_bus_failure_aborts_bring_up() {
        let mut front = [Pixel::WHITE; 32];
        let bus = CountingBus {
            fail: true,
            ..Default::default()
        };
        let result = Ili9341::initialize(bus, Windows::default(), &mut NoDelay, SMALL, &mut front);
        assert_eq!(result.err().map(|e| e.to_string()), Some("panel bus error: \"nack\"".into()));
    }

    #[test]
    fn test_front_region_too_small() {
        let mut front = [Pixel::BLACK; 31];
        let result = Ili9341::initialize(
            CountingBus::default(),
            Windows::default(),
            &mut NoDelay,
            SMALL,
            &mut front,
        );
        assert_eq!(
            result.err(),
            Some(PanelError::Graphics(GraphicsError::StorageTooSmall {
                required: 32,
                provided: 31
            }))
        );
    }

    #[test]
    fn test_configured_layer_is_bound() {
        let mut front = [Pixel::BLACK; 32];
        let config = PanelConfig {
            layer: 1,
            origin_x: 10,
            ..SMALL
        };
        let panel = Ili9341::initialize(
            CountingBus::default(),
            Windows::default(),
            &mut NoDelay,
            config,
            &mut front,
        )
        .unwrap();

        // Bound once, on the configured layer only.
        let binds = &panel.presenter().binder().0;
        assert_eq!(binds.len(), 1);
        let (layer, window) = binds[0];
        assert_eq!(layer, 1);
        assert_eq!((window.window_x0, window.window_x1), (10, 18));
        assert_eq!(panel.presenter().layer(), 1);
    }

    #[test]
    fn test_double_buffered_drawing() {
        let mut front = [Pixel::BLACK; 32];
        let mut back = [Pixel::BLACK; 32];
        let mut panel = Ili9341::initialize(
            CountingBus::default(),
            Windows::default(),
            &mut NoDelay,
            SMALL,
            &mut front,
        )
        .unwrap();
        panel.configure_back_buffer(&mut back).unwrap();

        panel
            .fill_rectangle(0, 0, 8, 4, Pixel::BLUE, Update::Deferred)
            .unwrap();
        assert_eq!(panel.presenter().visible_slot(), Slot::Primary);
        assert!(panel.present_frame().unwrap());
        assert_eq!(panel.presenter().visible_slot(), Slot::Secondary);
        assert_eq!(
            panel.presenter().visible_surface().pixel_at(7, 3).unwrap(),
            Pixel::BLUE
        );
        assert!(!panel.present_frame().unwrap());
    }

    #[test]
    fn test_text_through_driver() {
        // 3x2 font, glyphs for ' ' and '!'.
        const TABLE: [u8; 4] = [0x00, 0x00, 0xA0, 0x40];
        let font = Font::new(&TABLE, 3, 2);
        let mut front = [Pixel::BLACK; 32];
        let mut panel = Ili9341::initialize(
            CountingBus::default(),
            Windows::default(),
            &mut NoDelay,
            SMALL,
            &mut front,
        )
        .unwrap();

        panel
            .draw_text("!", 0, 0, &font, Pixel::WHITE, Update::Immediate)
            .unwrap();
        let visible = panel.presenter().visible_surface();
        assert_eq!(visible.pixel_at(0, 0).unwrap(), Pixel::WHITE);
        assert_eq!(visible.pixel_at(1, 0).unwrap(), Pixel::BLACK);
        assert_eq!(visible.pixel_at(1, 1).unwrap(), Pixel::WHITE);

        assert_eq!(
            panel
                .draw_glyph(b'~', 0, 0, &font, Pixel::WHITE, Update::Immediate)
                .unwrap_err(),
            GraphicsError::GlyphOutOfRange { code: b'~' }
        );
    }

    #[test]
    fn test_error_display() {
        let err: PanelError<Infallible> = GraphicsError::SizeMismatch.into();
        assert!(matches!(err, PanelError::Graphics(GraphicsError::SizeMismatch)));
        assert_eq!(err.to_string(), GraphicsError::SizeMismatch.to_string());

        let bus: PanelError<u8> = PanelError::Bus(7);
        assert_eq!(bus.to_string(), "panel bus error: 7");
    }
}
