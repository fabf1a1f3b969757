use kurbo::{Point, Vec2};
use peniko::Color;

/// Geometry and color constants for one logo rendition.
///
/// [`LogoStyle::default`] is the full-size rendition; [`LogoStyle::
/// compact`] is the half-scale variant used where smaller output is
/// wanted. The hollow quad is given in the halo graphic's own coordinate
/// space and halved when drawn.
#[derive(Debug, Clone)]
pub struct LogoStyle {
    pub font_size: f64,
    pub canvas_height: f64,
    pub base_width: f64,
    /// Baseline position as a fraction of the canvas height.
    pub text_baseline: f64,
    /// Horizontal shear factor for the italic look. Negative leans right.
    pub horizontal_tilt: f64,
    pub padding_x: f64,
    /// Offset of the halo/cross graphic relative to the column boundary.
    pub graph_offset: Vec2,
    /// Corners of the notch punched through the halo, halved when drawn.
    pub hollow_quad: [Point; 4],
    pub left_color: Color,
    pub right_color: Color,
    pub outline_color: Color,
    pub outline_width: f64,
    pub font_families: Vec<String>,
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self {
            font_size: 168.0,
            canvas_height: 500.0,
            base_width: 900.0,
            text_baseline: 0.68,
            horizontal_tilt: -0.4,
            padding_x: 20.0,
            graph_offset: Vec2::new(-30.0, 0.0),
            hollow_quad: [
                Point::new(568.0, 272.0),
                Point::new(642.0, 306.0),
                Point::new(318.0, 820.0),
                Point::new(296.0, 806.0),
            ],
            left_color: Color::from_rgb8(0x12, 0x8A, 0xFA),
            right_color: Color::from_rgb8(0x2B, 0x2B, 0x2B),
            outline_color: peniko::color::palette::css::WHITE,
            outline_width: 12.0,
            font_families: vec![
                "Ro GSan Serif Std".to_string(),
                "Glow Sans SC".to_string(),
                "sans-serif".to_string(),
            ],
        }
    }
}

impl LogoStyle {
    /// Half-scale rendition for inline/preview use.
    pub fn compact() -> Self {
        Self {
            font_size: 84.0,
            canvas_height: 250.0,
            base_width: 50.0,
            padding_x: 10.0,
            graph_offset: Vec2::new(-15.0, 0.0),
            hollow_quad: [
                Point::new(284.0, 136.0),
                Point::new(321.0, 153.0),
                Point::new(159.0, 410.0),
                Point::new(148.0, 403.0),
            ],
            ..Self::default()
        }
    }
}
