use kurbo::{BezPath, Point};
use ttf_parser::OutlineBuilder;

/// Converts ttf-parser glyph outlines into a shared kurbo path.
///
/// Glyph coordinates are font design units with y pointing up; the pen
/// scales them to pixels, flips to the y-down canvas convention and
/// offsets by the current horizontal pen position. The resulting path sits
/// on a baseline at y = 0.
pub(crate) struct OutlinePen<'p> {
    path: &'p mut BezPath,
    scale: f64,
    dx: f64,
}

impl<'p> OutlinePen<'p> {
    pub(crate) fn new(path: &'p mut BezPath, scale: f64, dx: f64) -> Self {
        Self { path, scale, dx }
    }

    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(self.dx + x as f64 * self.scale, -(y as f64) * self.scale)
    }
}

impl OutlineBuilder for OutlinePen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(self.map(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(self.map(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to(self.map(x1, y1), self.map(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path
            .curve_to(self.map(x1, y1), self.map(x2, y2), self.map(x, y));
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
