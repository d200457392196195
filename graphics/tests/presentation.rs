//! End-to-end drawing and presentation behaviour.

use tftlcd_graphics::{
    Font, GraphicsError, LayerBinder, LayerError, Pixel, PixelFormat, Presenter, Slot, Surface,
    Update,
};

/// Binder that records the base address of every bound surface.
#[derive(Default)]
struct AddressLog(Vec<usize>);

impl LayerBinder for AddressLog {
    fn bind_window(
        &mut self,
        _layer: u32,
        surface: &Surface<'_>,
        _origin_x: u32,
        _origin_y: u32,
    ) -> Result<(), LayerError> {
        self.0.push(surface.base_address());
        Ok(())
    }
}

// 4x3 glyphs for ' ', '!', '"'.
const FONT_TABLE: [u8; 9] = [
    0x00, 0x00, 0x00, // ' '
    0x00, 0x00, 0x00, // '!' blank
    0xF0, 0x90, 0xF0, // '"' box outline
];

fn font() -> Font<'static> {
    Font::new(&FONT_TABLE, 4, 3)
}

#[test]
fn single_buffered_border_scenario() {
    let mut storage = [Pixel::from_raw(0x1234); 16];
    let front = Surface::bind(&mut storage, 4, 4, PixelFormat::Rgb565).unwrap();
    let mut presenter = Presenter::initialize(AddressLog::default(), front).unwrap();

    presenter
        .fill_rectangle(0, 0, 4, 4, Pixel::from_raw(0x0000), Update::Immediate)
        .unwrap();
    presenter
        .fill_rectangle(1, 1, 2, 2, Pixel::from_raw(0xFFFF), Update::Immediate)
        .unwrap();

    let surface = presenter.visible_surface();
    for y in 0..4 {
        for x in 0..4 {
            let inner = (1..3).contains(&x) && (1..3).contains(&y);
            let expected = if inner { 0xFFFF } else { 0x0000 };
            assert_eq!(surface.pixel_at(x, y).unwrap().raw(), expected, "({x}, {y})");
        }
    }
}

#[test]
fn blank_glyph_still_advances_pen() {
    let mut storage = [Pixel::BLACK; 24];
    let front = Surface::bind(&mut storage, 8, 3, PixelFormat::Rgb565).unwrap();
    let mut presenter = Presenter::initialize(AddressLog::default(), front).unwrap();

    presenter
        .draw_text("!\"", 0, 0, &font(), Pixel::WHITE, Update::Immediate)
        .unwrap();

    let surface = presenter.visible_surface();
    // '!' is blank, so the box starts exactly one advance to the right.
    assert!((0..4).all(|x| surface.pixel_at(x, 0).unwrap() == Pixel::BLACK));
    assert!((4..8).all(|x| surface.pixel_at(x, 0).unwrap() == Pixel::WHITE));
    assert_eq!(surface.pixel_at(5, 1).unwrap(), Pixel::BLACK);
    assert_eq!(surface.pixel_at(7, 1).unwrap(), Pixel::WHITE);
}

#[test]
fn double_buffered_frame_cycle() {
    let mut front = vec![Pixel::WHITE; 24];
    let mut back = vec![Pixel::WHITE; 24];
    let front_addr = front.as_ptr() as usize;
    let back_addr = back.as_ptr() as usize;

    let mut presenter = Presenter::initialize(
        AddressLog::default(),
        Surface::bind(&mut front, 8, 3, PixelFormat::Rgb565).unwrap(),
    )
    .unwrap();
    presenter
        .configure_back_buffer(Surface::bind(&mut back, 8, 3, PixelFormat::Rgb565).unwrap())
        .unwrap();

    // Frame 1: background plus a box, presented explicitly.
    presenter
        .fill_rectangle(0, 0, 8, 3, Pixel::BLUE, Update::Deferred)
        .unwrap();
    presenter
        .draw_glyph(b'"', 2, 0, &font(), Pixel::YELLOW, Update::Deferred)
        .unwrap();
    assert_eq!(presenter.visible_surface().pixel_at(0, 0).unwrap(), Pixel::BLACK);
    assert!(presenter.present_frame().unwrap());
    assert!(!presenter.present_frame().unwrap());

    assert_eq!(presenter.visible_slot(), Slot::Secondary);
    assert_eq!(
        presenter.hidden_surface().unwrap().as_bytes(),
        presenter.visible_surface().as_bytes()
    );

    // Frame 2: only the box interior changes.
    presenter
        .fill_rectangle(3, 1, 2, 1, Pixel::RED, Update::Immediate)
        .unwrap();

    let visible = presenter.visible_surface();
    assert_eq!(presenter.visible_slot(), Slot::Primary);
    assert_eq!(visible.pixel_at(0, 0).unwrap(), Pixel::BLUE);
    assert_eq!(visible.pixel_at(2, 0).unwrap(), Pixel::YELLOW);
    assert_eq!(visible.pixel_at(3, 1).unwrap(), Pixel::RED);
    assert_eq!(presenter.hidden_surface().unwrap().as_bytes(), visible.as_bytes());

    assert_eq!(
        presenter.binder().0,
        vec![front_addr, back_addr, front_addr]
    );
}

#[test]
fn contract_violations_are_reported() {
    let mut front = [Pixel::BLACK; 16];
    let mut back = [Pixel::BLACK; 16];
    let mut spare = [Pixel::BLACK; 16];
    let mut presenter = Presenter::initialize(
        AddressLog::default(),
        Surface::bind(&mut front, 4, 4, PixelFormat::Rgb565).unwrap(),
    )
    .unwrap();
    presenter
        .configure_back_buffer(Surface::bind(&mut back, 4, 4, PixelFormat::Rgb565).unwrap())
        .unwrap();

    assert_eq!(
        presenter
            .configure_back_buffer(Surface::bind(&mut spare, 4, 4, PixelFormat::Rgb565).unwrap())
            .unwrap_err(),
        GraphicsError::BackBufferAlreadyConfigured
    );
    assert_eq!(
        presenter
            .draw_glyph(0x1F, 0, 0, &font(), Pixel::WHITE, Update::Immediate)
            .unwrap_err(),
        GraphicsError::GlyphOutOfRange { code: 0x1F }
    );
    assert_eq!(
        presenter
            .fill_rectangle(2, 2, 3, 1, Pixel::WHITE, Update::Immediate)
            .unwrap_err(),
        GraphicsError::OutOfBounds { x: 4, y: 2 }
    );

    assert_eq!(presenter.visible_slot(), Slot::Primary);
    assert!(!presenter.has_pending_frame());
    assert_eq!(presenter.binder().0.len(), 1);
}
