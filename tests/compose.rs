use lunette::{
    CANVAS_SIZE, EditorState, FrameAsset, FrameGeometry, OutputSurface, PhotoFile, RenderOptions,
    encode_png, photo_draw_rect, render,
};

fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn solid_photo(width: u32, height: u32, rgba: [u8; 4]) -> PhotoFile {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    PhotoFile::new("image/png", png_bytes(&img))
}

/// 1080x1080 overlay: opaque border ring, transparent interior.
fn ring_overlay() -> FrameAsset {
    let side = CANVAS_SIZE;
    let img = image::RgbaImage::from_fn(side, side, |x, y| {
        let border = x < 40 || y < 40 || x >= side - 40 || y >= side - 40;
        if border {
            image::Rgba([30, 30, 30, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    FrameAsset::from_bytes(&png_bytes(&img), FrameGeometry::default()).unwrap()
}

fn pixel(surface: &OutputSurface, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * surface.size() + x) * 4) as usize;
    let d = surface.data();
    [d[i], d[i + 1], d[i + 2], d[i + 3]]
}

#[test]
fn end_to_end_2000x1000_landscape() {
    let mut state = EditorState::new(FrameGeometry::default());
    state
        .load_photo(&solid_photo(2000, 1000, [200, 60, 20, 255]))
        .unwrap();

    // default scale = clamp(840/1000, 0.5, 2.0)
    assert_eq!(state.scale(), 0.84);

    // draw rect: 1680x840 centered on (540, 540), allowing for float rounding
    let rect = photo_draw_rect(2000, 1000, state.scale(), state.offset());
    assert!((rect.x0 - -300.0).abs() < 1e-9, "rect {rect:?}");
    assert!((rect.y0 - 120.0).abs() < 1e-9, "rect {rect:?}");
    assert!((rect.width() - 1680.0).abs() < 1e-9, "rect {rect:?}");
    assert!((rect.height() - 840.0).abs() < 1e-9, "rect {rect:?}");

    let mut surface = OutputSurface::new();
    render(&state, Some(&ring_overlay()), &mut surface, &RenderOptions::default()).unwrap();

    // photo fills the center band
    assert_eq!(pixel(&surface, 540, 540), [200, 60, 20, 255]);
    // above the rect: background shows through the transparent overlay interior
    assert_eq!(pixel(&surface, 540, 60), [255, 255, 255, 255]);
    // the opaque ring overrides the photo beneath it
    assert_eq!(pixel(&surface, 10, 540), [30, 30, 30, 255]);
    assert_eq!(pixel(&surface, 1070, 940), [30, 30, 30, 255]);
}

#[test]
fn export_matches_surface_content() {
    let mut state = EditorState::new(FrameGeometry::default());
    state
        .load_photo(&solid_photo(600, 600, [10, 120, 240, 255]))
        .unwrap();

    let mut surface = OutputSurface::new();
    render(&state, Some(&ring_overlay()), &mut surface, &RenderOptions::default()).unwrap();

    let decoded = image::load_from_memory(&encode_png(&surface).unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
    assert_eq!(decoded.get_pixel(540, 540).0, pixel(&surface, 540, 540));
    assert_eq!(decoded.get_pixel(10, 10).0, pixel(&surface, 10, 10));
}

#[test]
fn no_photo_renders_background_only_even_with_overlay() {
    let mut state = EditorState::new(FrameGeometry::default());
    let mut surface = OutputSurface::new();
    let options = RenderOptions {
        background_rgba: [0, 0, 0, 255],
    };

    // idle state: uniform background, the overlay is not drawn yet
    render(&state, Some(&ring_overlay()), &mut surface, &options).unwrap();
    assert!(surface.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

    // once a photo loads, the overlay ring appears and the background
    // remains the configured color where the transparent interior shows it
    state
        .load_photo(&solid_photo(100, 50, [200, 200, 0, 255]))
        .unwrap();
    render(&state, Some(&ring_overlay()), &mut surface, &options).unwrap();
    assert_eq!(pixel(&surface, 5, 5), [30, 30, 30, 255]);
    assert_eq!(pixel(&surface, 540, 100), [0, 0, 0, 255]);
}
