//! End-to-end compositor tests.
//!
//! The paint tests drive the pipeline with synthetic assets and empty
//! label outlines so they are font-independent; the full render tests use
//! whatever system fonts the host has and skip when there are none.

use std::sync::Arc;

use anycanvas_skia::SkiaCanvas;
use base64::Engine as _;
use bawiki_font::{FontBook, TextMetrics};
use bawiki_logo::{
    BASE64_SCHEME, LabelOutlines, LogoAssets, LogoLayout, LogoOptions, LogoRenderer, LogoStyle,
    paint_logo,
};
use kurbo::BezPath;
use peniko::{Blob, Image, ImageFormat};

fn uniform_image(size: u32, rgba: [u8; 4]) -> Image {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for _ in 0..size * size {
        data.extend_from_slice(&rgba);
    }
    Image {
        data: Blob::new(Arc::new(data)),
        format: ImageFormat::Rgba8,
        width: size,
        height: size,
        alpha: 1.0,
        x_extend: peniko::Extend::Pad,
        y_extend: peniko::Extend::Pad,
        quality: peniko::ImageQuality::Medium,
    }
}

/// Solid white halo and invisible cross: lets the probes observe exactly
/// what the notch erases.
fn probe_assets() -> LogoAssets {
    LogoAssets {
        halo: uniform_image(8, [255, 255, 255, 255]),
        cross: uniform_image(8, [0, 0, 0, 0]),
    }
}

fn short_metrics() -> TextMetrics {
    TextMetrics {
        width: 100.0,
        ascent: 126.0,
        descent: 42.0,
    }
}

fn empty_labels() -> LabelOutlines {
    LabelOutlines {
        left: BezPath::new(),
        left_width: 100.0,
        right: BezPath::new(),
    }
}

fn paint_probe_canvas(transparent_bg: bool) -> SkiaCanvas {
    let style = LogoStyle::default();
    let layout = LogoLayout::compute(&style, &short_metrics(), &short_metrics());
    assert_eq!((layout.width, layout.height), (900.0, 500.0));

    let mut canvas = SkiaCanvas::new(900, 500).unwrap();
    paint_logo(
        &mut canvas,
        &style,
        &layout,
        &probe_assets(),
        &empty_labels(),
        &LogoOptions { transparent_bg },
    );
    canvas
}

// The halo graphic sits at (170, 0) for short labels; the notch centroid
// lands near (398, 275) inside it.
const HALO_POINT: (u32, u32) = (220, 50);
const NOTCH_POINT: (u32, u32) = (398, 275);
const CORNER_POINT: (u32, u32) = (5, 5);

#[test]
fn transparent_output_punches_the_notch_through_the_halo() {
    let canvas = paint_probe_canvas(true);
    assert_eq!(canvas.pixel(HALO_POINT.0, HALO_POINT.1).unwrap().3, 255);
    assert_eq!(canvas.pixel(NOTCH_POINT.0, NOTCH_POINT.1).unwrap().3, 0);
    assert_eq!(canvas.pixel(CORNER_POINT.0, CORNER_POINT.1).unwrap().3, 0);
}

#[test]
fn opaque_output_fills_the_notch_white_instead() {
    let canvas = paint_probe_canvas(false);
    assert_eq!(
        canvas.pixel(NOTCH_POINT.0, NOTCH_POINT.1).unwrap(),
        (255, 255, 255, 255)
    );
    assert_eq!(
        canvas.pixel(CORNER_POINT.0, CORNER_POINT.1).unwrap(),
        (255, 255, 255, 255)
    );
}

fn system_fonts() -> Option<FontBook> {
    let mut book = FontBook::new();
    if book.load_system_fonts() == 0 {
        return None;
    }
    book.resolve(&["sans-serif"]).ok()?;
    Some(book)
}

fn decode_payload(output: &str) -> tiny_skia::Pixmap {
    let payload = output.strip_prefix(BASE64_SCHEME).expect("scheme marker");
    assert!(!payload.is_empty());
    let png = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .expect("valid base64");
    tiny_skia::Pixmap::decode_png(&png).expect("valid png")
}

#[test]
fn long_labels_render_wider_than_the_base_canvas() {
    let Some(fonts) = system_fonts() else { return };
    let renderer = LogoRenderer::new(fonts, probe_assets());
    let output = renderer
        .render("Sensei", "Blue Archive", &LogoOptions::default())
        .unwrap();

    let pixmap = decode_payload(&output);
    assert!(pixmap.width() > 900);
    assert_eq!(pixmap.height(), 500);

    // All four corners of a transparent render stay empty.
    let (w, h) = (pixmap.width() - 1, pixmap.height() - 1);
    for (x, y) in [(0, 0), (w, 0), (0, h), (w, h)] {
        let alpha = pixmap.pixel(x, y).unwrap().alpha();
        assert_eq!(alpha, 0, "corner ({x}, {y}) should be transparent");
    }
}

#[test]
fn short_labels_take_the_cropped_path() {
    let Some(fonts) = system_fonts() else { return };
    let renderer = LogoRenderer::new(fonts, probe_assets());
    let output = renderer.render("i", "i", &LogoOptions::default()).unwrap();

    let pixmap = decode_payload(&output);
    assert!(pixmap.width() < 900);
    assert!(pixmap.width() > 0);
    assert_eq!(pixmap.height(), 500);
}

#[test]
fn compact_style_renders_at_half_height() {
    let Some(fonts) = system_fonts() else { return };
    let renderer = LogoRenderer::new(fonts, probe_assets()).with_style(LogoStyle::compact());
    assert_eq!(renderer.style().canvas_height, 250.0);
    let output = renderer.render("S", "BA", &LogoOptions::default()).unwrap();
    let pixmap = decode_payload(&output);
    assert_eq!(pixmap.height(), 250);
    assert!(pixmap.width() > 0);
}

#[test]
fn identical_inputs_yield_identical_output() {
    let Some(fonts) = system_fonts() else { return };
    let renderer = LogoRenderer::new(fonts, probe_assets());
    let opts = LogoOptions::default();
    let first = renderer.render("Sensei", "Blue Archive", &opts).unwrap();
    let second = renderer.render("Sensei", "Blue Archive", &opts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_labels_still_produce_an_image() {
    let Some(fonts) = system_fonts() else { return };
    let renderer = LogoRenderer::new(fonts, probe_assets());
    let output = renderer.render("", "", &LogoOptions::default()).unwrap();
    let pixmap = decode_payload(&output);
    assert!(pixmap.width() > 0);
    assert_eq!(pixmap.height(), 500);
}

#[test]
fn missing_fonts_fail_the_render() {
    let renderer = LogoRenderer::new(FontBook::new(), probe_assets());
    assert!(matches!(
        renderer.render("a", "b", &LogoOptions::default()),
        Err(bawiki_logo::LogoError::Font(_))
    ));
}
