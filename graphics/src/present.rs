//! Front/back buffer presentation.
//!
//! A [`Presenter`] owns one or two surfaces. With a single surface every
//! draw lands directly on the visible image. Once a back buffer is
//! configured, draws target the hidden slot and [`Presenter::present_frame`]
//! flips which slot the output window shows.
//!
//! After each flip the newly hidden slot is refreshed from the newly
//! visible one, so incremental drawing always starts from the last
//! presented image. This costs one full-frame copy per presentation.

use crate::blit::{BlockCopy, NoAccelerator};
use crate::font::Font;
use crate::layer::LayerBinder;
use crate::pixel::Pixel;
use crate::surface::Surface;
use crate::GraphicsError;

/// One of the two physical pixel buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Slot 0, bound at initialization.
    Primary,
    /// Slot 1, the configured back buffer.
    Secondary,
}

impl Slot {
    /// The opposite slot.
    pub const fn other(self) -> Self {
        match self {
            Slot::Primary => Slot::Secondary,
            Slot::Secondary => Slot::Primary,
        }
    }

    /// Slot index (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Slot::Primary => 0,
            Slot::Secondary => 1,
        }
    }
}

/// Whether a draw call also presents the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Update {
    /// Leave the frame pending until the next presentation.
    Deferred,
    /// Present before the draw call returns (double-buffered mode only).
    #[default]
    Immediate,
}

enum Buffering<'a> {
    /// Only slot 0 exists; nothing is ever swapped.
    Single,
    /// Slot 1 is configured.
    Double {
        back: Surface<'a>,
        visible: Slot,
        pending: bool,
    },
}

/// Double-buffer coordinator for one display output.
pub struct Presenter<'a, L, A = NoAccelerator> {
    /// Slot 0.
    front: Surface<'a>,
    /// Buffering mode, holding slot 1 once configured.
    buffering: Buffering<'a>,
    /// Output window binder.
    binder: L,
    /// Optional block-copy engine.
    accelerator: Option<A>,
    /// Display layer the visible slot is bound to.
    layer: u32,
    /// Window origin on the display.
    origin: (u32, u32),
}

impl<'a, L: LayerBinder> Presenter<'a, L, NoAccelerator> {
    /// Initialize single-buffered presentation on `front`.
    ///
    /// The surface is cleared to black and bound to display layer 0.
    pub fn initialize(binder: L, front: Surface<'a>) -> Result<Self, GraphicsError> {
        Self::build(binder, front, None, 0, (0, 0))
    }

    /// Initialize on a given display layer, with the window placed at
    /// (`origin_x`, `origin_y`). No other layer is touched.
    pub fn initialize_on_layer(
        binder: L,
        front: Surface<'a>,
        layer: u32,
        origin_x: u32,
        origin_y: u32,
    ) -> Result<Self, GraphicsError> {
        Self::build(binder, front, None, layer, (origin_x, origin_y))
    }
}

impl<'a, L: LayerBinder, A: BlockCopy> Presenter<'a, L, A> {
    /// Initialize with a block-copy engine used for frame synchronization.
    pub fn initialize_accelerated(
        binder: L,
        front: Surface<'a>,
        accelerator: A,
    ) -> Result<Self, GraphicsError> {
        Self::build(binder, front, Some(accelerator), 0, (0, 0))
    }

    /// Like [`Presenter::initialize_on_layer`], with a block-copy engine.
    pub fn initialize_accelerated_on_layer(
        binder: L,
        front: Surface<'a>,
        accelerator: A,
        layer: u32,
        origin_x: u32,
        origin_y: u32,
    ) -> Result<Self, GraphicsError> {
        Self::build(binder, front, Some(accelerator), layer, (origin_x, origin_y))
    }

    fn build(
        mut binder: L,
        mut front: Surface<'a>,
        accelerator: Option<A>,
        layer: u32,
        origin: (u32, u32),
    ) -> Result<Self, GraphicsError> {
        front.clear(Pixel::BLACK);
        bind_window(&mut binder, layer, origin, Slot::Primary, &front)?;

        log::info!(
            "presenter: {}x{} front buffer at {:#x} on layer {}",
            front.width(),
            front.height(),
            front.base_address(),
            layer
        );
        Ok(Presenter {
            front,
            buffering: Buffering::Single,
            binder,
            accelerator,
            layer,
            origin,
        })
    }

    /// Select the display layer and window origin used by later bindings.
    pub fn set_layer(&mut self, layer: u32, origin_x: u32, origin_y: u32) {
        self.layer = layer;
        self.origin = (origin_x, origin_y);
    }

    /// Display layer the visible slot is bound to.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Output window binder.
    pub fn binder(&self) -> &L {
        &self.binder
    }

    /// Mutable output window binder.
    pub fn binder_mut(&mut self) -> &mut L {
        &mut self.binder
    }

    /// Configure slot 1 and switch to double buffering.
    ///
    /// The back surface must match the front one and is cleared to black.
    /// Configuring twice is rejected without changing any state.
    pub fn configure_back_buffer(&mut self, mut back: Surface<'a>) -> Result<(), GraphicsError> {
        if let Buffering::Double { .. } = self.buffering {
            log::warn!("presenter: back buffer already configured");
            return Err(GraphicsError::BackBufferAlreadyConfigured);
        }
        if back.width() != self.front.width()
            || back.height() != self.front.height()
            || back.format() != self.front.format()
        {
            return Err(GraphicsError::SizeMismatch);
        }

        back.clear(Pixel::BLACK);
        log::debug!("presenter: back buffer at {:#x}", back.base_address());

        self.buffering = Buffering::Double {
            back,
            visible: Slot::Primary,
            pending: false,
        };
        Ok(())
    }

    /// Whether a back buffer is configured.
    pub fn is_double_buffered(&self) -> bool {
        matches!(self.buffering, Buffering::Double { .. })
    }

    /// Slot currently shown by the output window.
    pub fn visible_slot(&self) -> Slot {
        match self.buffering {
            Buffering::Single => Slot::Primary,
            Buffering::Double { visible, .. } => visible,
        }
    }

    /// Whether a draw happened since the last presentation.
    pub fn has_pending_frame(&self) -> bool {
        match self.buffering {
            Buffering::Single => false,
            Buffering::Double { pending, .. } => pending,
        }
    }

    fn slot(&self, slot: Slot) -> &Surface<'a> {
        match (&self.buffering, slot) {
            (Buffering::Double { back, .. }, Slot::Secondary) => back,
            _ => &self.front,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Surface<'a> {
        match (&mut self.buffering, slot) {
            (Buffering::Double { back, .. }, Slot::Secondary) => back,
            _ => &mut self.front,
        }
    }

    fn draw_slot(&self) -> Slot {
        match self.buffering {
            Buffering::Single => Slot::Primary,
            Buffering::Double { visible, .. } => visible.other(),
        }
    }

    /// Surface shown by the output window.
    pub fn visible_surface(&self) -> &Surface<'a> {
        self.slot(self.visible_slot())
    }

    /// Surface that receives draw calls.
    pub fn draw_surface(&self) -> &Surface<'a> {
        self.slot(self.draw_slot())
    }

    /// Hidden surface, if double buffering is configured.
    pub fn hidden_surface(&self) -> Option<&Surface<'a>> {
        match self.buffering {
            Buffering::Single => None,
            Buffering::Double { visible, .. } => Some(self.slot(visible.other())),
        }
    }

    /// Run a drawing operation against the draw target.
    ///
    /// A successful draw marks the frame pending. With
    /// [`Update::Immediate`] the frame is presented before returning when
    /// double buffering is active.
    pub fn draw_with<F>(&mut self, update: Update, op: F) -> Result<(), GraphicsError>
    where
        F: FnOnce(&mut Surface<'a>) -> Result<(), GraphicsError>,
    {
        let target = self.draw_slot();
        op(self.slot_mut(target))?;

        if let Buffering::Double { pending, .. } = &mut self.buffering {
            *pending = true;
            if update == Update::Immediate {
                self.present_frame()?;
            }
        }
        Ok(())
    }

    /// Fill a rectangle on the draw target.
    pub fn fill_rectangle(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Pixel,
        update: Update,
    ) -> Result<(), GraphicsError> {
        self.draw_with(update, |surface| {
            surface.fill_rectangle(x, y, width, height, color)
        })
    }

    /// Draw a string on the draw target.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
        update: Update,
    ) -> Result<(), GraphicsError> {
        self.draw_with(update, |surface| surface.draw_text(text, x, y, font, color))
    }

    /// Draw one glyph on the draw target.
    pub fn draw_glyph(
        &mut self,
        code: u8,
        x: u32,
        y: u32,
        font: &Font<'_>,
        color: Pixel,
        update: Update,
    ) -> Result<(), GraphicsError> {
        self.draw_with(update, |surface| surface.draw_glyph(code, x, y, font, color))
    }

    /// Make the latest frame visible.
    ///
    /// Returns `Ok(false)` when there is nothing to present: single
    /// buffering, or no draw since the previous presentation. Otherwise the
    /// hidden slot is bound to the output window, becomes visible, and the
    /// other slot is refreshed from it.
    pub fn present_frame(&mut self) -> Result<bool, GraphicsError> {
        let Buffering::Double {
            back,
            visible,
            pending,
        } = &mut self.buffering
        else {
            return Ok(false);
        };
        if !*pending {
            return Ok(false);
        }

        let shown = visible.other();
        let surface = match shown {
            Slot::Primary => &self.front,
            Slot::Secondary => &*back,
        };
        bind_window(&mut self.binder, self.layer, self.origin, shown, surface)?;
        *visible = shown;

        let accelerator = self.accelerator.as_mut().map(|a| a as &mut dyn BlockCopy);
        match shown {
            Slot::Primary => back.copy_from(&self.front, accelerator)?,
            Slot::Secondary => self.front.copy_from(back, accelerator)?,
        }
        *pending = false;

        log::trace!("presenter: slot {} visible", shown.index());
        Ok(true)
    }
}

fn bind_window<L: LayerBinder>(
    binder: &mut L,
    layer: u32,
    (origin_x, origin_y): (u32, u32),
    slot: Slot,
    surface: &Surface<'_>,
) -> Result<(), GraphicsError> {
    binder
        .bind_window(layer, surface, origin_x, origin_y)
        .map_err(|err| {
            log::warn!("presenter: layer {} rejected slot {}: {}", layer, slot.index(), err);
            GraphicsError::LayerRejected { layer }
        })
}
