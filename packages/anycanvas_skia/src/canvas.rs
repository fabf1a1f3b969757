use anycanvas::{Brush, Canvas, Compose};
use kurbo::{Affine, PathEl, Rect, Shape};
use peniko::{Color, Image, ImageFormat};
use thiserror::Error;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pattern, Pixmap, PixmapPaint,
    SpreadMode, Transform,
};

/// Flattening tolerance used when converting kurbo shapes to skia paths.
const DEFAULT_TOLERANCE: f64 = 0.1;

/// PNG serialization failure.
#[derive(Debug, Error)]
#[error("png encoding failed: {0}")]
pub struct PngEncodeError(String);

fn to_skia_path(shape: &impl Shape) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in shape.path_elements(DEFAULT_TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p) => pb.quad_to(p1.x as f32, p1.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(p1, p2, p) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn to_skia_blend(compose: Compose) -> BlendMode {
    match compose {
        Compose::Clear => BlendMode::Clear,
        Compose::SrcOver => BlendMode::SourceOver,
        Compose::DestOver => BlendMode::DestinationOver,
        Compose::SrcIn => BlendMode::SourceIn,
        Compose::DestIn => BlendMode::DestinationIn,
        Compose::SrcOut => BlendMode::SourceOut,
        Compose::DestOut => BlendMode::DestinationOut,
        Compose::SrcAtop => BlendMode::SourceAtop,
        Compose::DestAtop => BlendMode::DestinationAtop,
        Compose::Xor => BlendMode::Xor,
        Compose::Plus => BlendMode::Plus,
        _ => BlendMode::SourceOver,
    }
}

fn to_skia_stroke(style: &kurbo::Stroke) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width: style.width as f32,
        miter_limit: style.miter_limit as f32,
        line_cap: match style.start_cap {
            kurbo::Cap::Butt => tiny_skia::LineCap::Butt,
            kurbo::Cap::Square => tiny_skia::LineCap::Square,
            kurbo::Cap::Round => tiny_skia::LineCap::Round,
        },
        line_join: match style.join {
            kurbo::Join::Bevel => tiny_skia::LineJoin::Bevel,
            kurbo::Join::Miter => tiny_skia::LineJoin::Miter,
            kurbo::Join::Round => tiny_skia::LineJoin::Round,
        },
        dash: None,
    }
}

/// Convert an RGBA8 image to a premultiplied skia pixmap.
fn to_skia_pixmap(image: &Image) -> Option<Pixmap> {
    if !matches!(image.format, ImageFormat::Rgba8) {
        return None;
    }
    let size = IntSize::from_wh(image.width, image.height)?;
    let data = image.data.as_ref();
    let expected = image.width as usize * image.height as usize * 4;
    if data.len() < expected {
        return None;
    }
    let mut premul = Vec::with_capacity(expected);
    for px in data[..expected].chunks_exact(4) {
        let alpha = px[3] as u16;
        premul.push(((px[0] as u16 * alpha) / 255) as u8);
        premul.push(((px[1] as u16 * alpha) / 255) as u8);
        premul.push(((px[2] as u16 * alpha) / 255) as u8);
        premul.push(px[3]);
    }
    Pixmap::from_vec(premul, size)
}

/// A CPU [`Canvas`] backed by a `tiny_skia::Pixmap`.
pub struct SkiaCanvas {
    pixmap: Pixmap,
}

impl SkiaCanvas {
    /// Create a transparent canvas. Returns `None` for a zero-sized surface.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
        })
    }

    /// Copy the region at `(x, y)` of the given size into a fresh canvas.
    ///
    /// Source coordinates may run outside the surface; uncovered areas of
    /// the output stay transparent, matching out-of-bounds image sampling.
    pub fn copy_region(&self, x: i32, y: i32, width: u32, height: u32) -> Option<SkiaCanvas> {
        let mut out = Pixmap::new(width, height)?;
        out.draw_pixmap(
            -x,
            -y,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Some(SkiaCanvas { pixmap: out })
    }

    /// Demultiplied RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some((px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Serialize the surface as a PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, PngEncodeError> {
        self.pixmap
            .encode_png()
            .map_err(|e| PngEncodeError(e.to_string()))
    }

    pub fn finish(self) -> Pixmap {
        self.pixmap
    }
}

impl Canvas for SkiaCanvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill<'a>(
        &mut self,
        compose: Compose,
        transform: Affine,
        brush: impl Into<Brush<'a>>,
        shape: &impl Shape,
    ) {
        let Some(path) = to_skia_path(shape) else {
            return;
        };
        let transform = to_skia_transform(transform);
        match brush.into() {
            Brush::Solid(color) => {
                let mut paint = Paint::default();
                paint.set_color(to_skia_color(color));
                paint.anti_alias = true;
                paint.blend_mode = to_skia_blend(compose);
                self.pixmap
                    .fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
            Brush::Image(image) => {
                let Some(pattern) = to_skia_pixmap(image) else {
                    return;
                };
                let mut paint = Paint::default();
                paint.shader = Pattern::new(
                    pattern.as_ref(),
                    SpreadMode::Pad,
                    FilterQuality::Bilinear,
                    1.0,
                    Transform::identity(),
                );
                paint.anti_alias = true;
                paint.blend_mode = to_skia_blend(compose);
                self.pixmap
                    .fill_path(&path, &paint, FillRule::Winding, transform, None);
            }
        }
    }

    fn stroke<'a>(
        &mut self,
        compose: Compose,
        style: &kurbo::Stroke,
        transform: Affine,
        brush: impl Into<Brush<'a>>,
        shape: &impl Shape,
    ) {
        let Some(path) = to_skia_path(shape) else {
            return;
        };
        let transform = to_skia_transform(transform);
        let stroke = to_skia_stroke(style);
        match brush.into() {
            Brush::Solid(color) => {
                let mut paint = Paint::default();
                paint.set_color(to_skia_color(color));
                paint.anti_alias = true;
                paint.blend_mode = to_skia_blend(compose);
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, transform, None);
            }
            Brush::Image(image) => {
                let Some(pattern) = to_skia_pixmap(image) else {
                    return;
                };
                let mut paint = Paint::default();
                paint.shader = Pattern::new(
                    pattern.as_ref(),
                    SpreadMode::Pad,
                    FilterQuality::Bilinear,
                    1.0,
                    Transform::identity(),
                );
                paint.anti_alias = true;
                paint.blend_mode = to_skia_blend(compose);
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, transform, None);
            }
        }
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let Some(src) = to_skia_pixmap(image) else {
            return;
        };
        let sx = (dest.width() / image.width as f64) as f32;
        let sy = (dest.height() / image.height as f64) as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, dest.x0 as f32, dest.y0 as f32);
        let paint = PixmapPaint {
            opacity: 1.0,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use peniko::Blob;

    fn rgba_image(width: u32, height: u32, rgba: [u8; 4]) -> Image {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Image {
            data: Blob::new(Arc::new(data)),
            format: ImageFormat::Rgba8,
            width,
            height,
            alpha: 1.0,
            x_extend: peniko::Extend::Pad,
            y_extend: peniko::Extend::Pad,
            quality: peniko::ImageQuality::Medium,
        }
    }

    #[test]
    fn fill_paints_inside_and_leaves_outside() {
        let mut canvas = SkiaCanvas::new(10, 10).unwrap();
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            Color::from_rgb8(255, 0, 0),
            &Rect::new(2.0, 2.0, 8.0, 8.0),
        );
        assert_eq!((canvas.width(), canvas.height()), (10, 10));
        assert_eq!(canvas.pixel(5, 5).unwrap(), (255, 0, 0, 255));
        assert_eq!(canvas.pixel(0, 0).unwrap().3, 0);
    }

    #[test]
    fn clear_resets_to_transparent() {
        let mut canvas = SkiaCanvas::new(4, 4).unwrap();
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            Color::from_rgb8(1, 2, 3),
            &Rect::new(0.0, 0.0, 4.0, 4.0),
        );
        canvas.clear();
        assert_eq!(canvas.pixel(2, 2).unwrap().3, 0);
    }

    #[test]
    fn image_brush_fills_with_a_pattern() {
        let mut canvas = SkiaCanvas::new(4, 4).unwrap();
        let image = rgba_image(2, 2, [5, 6, 7, 255]);
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            &image,
            &Rect::new(0.0, 0.0, 4.0, 4.0),
        );
        assert_eq!(canvas.pixel(1, 1).unwrap(), (5, 6, 7, 255));
    }

    #[test]
    fn finish_hands_back_the_pixmap() {
        let canvas = SkiaCanvas::new(5, 4).unwrap();
        let pixmap = canvas.finish();
        assert_eq!((pixmap.width(), pixmap.height()), (5, 4));
    }

    #[test]
    fn dest_out_erases_pixels() {
        let mut canvas = SkiaCanvas::new(10, 10).unwrap();
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            Color::from_rgb8(0, 0, 255),
            &Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        canvas.fill(
            Compose::DestOut,
            Affine::IDENTITY,
            Color::from_rgb8(255, 255, 255),
            &Rect::new(3.0, 3.0, 7.0, 7.0),
        );
        assert_eq!(canvas.pixel(5, 5).unwrap().3, 0);
        assert_eq!(canvas.pixel(1, 1).unwrap().3, 255);
    }

    #[test]
    fn fill_applies_horizontal_shear() {
        let mut canvas = SkiaCanvas::new(10, 4).unwrap();
        // x' = x + 2y: on the y in [1, 2] rows the rect [0, 4) covers
        // [2y, 2y + 4), so pixel (4, 1) is fully inside and (0, 1) is not
        // touched at all.
        let shear = Affine::new([1.0, 0.0, 2.0, 1.0, 0.0, 0.0]);
        canvas.fill(
            Compose::SrcOver,
            shear,
            Color::from_rgb8(0, 255, 0),
            &Rect::new(0.0, 0.0, 4.0, 2.0),
        );
        assert_eq!(canvas.pixel(4, 1).unwrap().3, 255);
        assert_eq!(canvas.pixel(0, 1).unwrap().3, 0);
    }

    #[test]
    fn draw_image_scales_to_dest() {
        let mut canvas = SkiaCanvas::new(8, 8).unwrap();
        let image = rgba_image(2, 2, [10, 20, 30, 255]);
        canvas.draw_image(&image, Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(canvas.pixel(4, 4).unwrap(), (10, 20, 30, 255));
    }

    #[test]
    fn copy_region_fills_out_of_bounds_with_transparency() {
        let mut canvas = SkiaCanvas::new(4, 4).unwrap();
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            Color::from_rgb8(0, 128, 0),
            &Rect::new(0.0, 0.0, 4.0, 4.0),
        );
        let out = canvas.copy_region(-2, 0, 4, 4).unwrap();
        assert_eq!(out.pixel(0, 0).unwrap().3, 0);
        assert_eq!(out.pixel(2, 0).unwrap().3, 255);
    }

    #[test]
    fn png_round_trip_preserves_size() {
        let mut canvas = SkiaCanvas::new(6, 3).unwrap();
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            Color::from_rgb8(200, 100, 50),
            &Rect::new(0.0, 0.0, 6.0, 3.0),
        );
        let png = canvas.encode_png().unwrap();
        let decoded = Pixmap::decode_png(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 3));
    }
}
