use bawiki_font::TextMetrics;
use kurbo::Point;

use crate::style::LogoStyle;

/// Per-invocation layout scalars, derived once from the two text
/// measurements and the style constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoLayout {
    /// Shear-compensated extent of the left label.
    pub text_width_l: f64,
    /// Shear-compensated extent of the right label.
    pub text_width_r: f64,
    pub col_width_l: f64,
    pub col_width_r: f64,
    /// Full canvas width: always the sum of the two column widths.
    pub width: f64,
    pub height: f64,
}

impl LogoLayout {
    /// Derive the layout from the measured labels.
    ///
    /// The shear compensation widens each side by the horizontal distance
    /// the tilt displaces the glyph box at its extreme: the left label's
    /// descender bottom and the right label's ascender top. Each column is
    /// then clamped to no less than half the base width.
    pub fn compute(style: &LogoStyle, left: &TextMetrics, right: &TextMetrics) -> Self {
        let text_width_l = left.width
            - (style.text_baseline * style.canvas_height + left.descent) * style.horizontal_tilt;
        let text_width_r = right.width
            + (style.text_baseline * style.canvas_height - right.ascent) * style.horizontal_tilt;

        let half = style.base_width / 2.0;
        let col_width_l = (text_width_l + style.padding_x).max(half);
        let col_width_r = (text_width_r + style.padding_x).max(half);

        Self {
            text_width_l,
            text_width_r,
            col_width_l,
            col_width_r,
            width: col_width_l + col_width_r,
            height: style.canvas_height,
        }
    }

    /// Top-left corner of the halo/cross graphic: anchored to the column
    /// boundary, shifted by the style offset.
    pub fn graph_pos(&self, style: &LogoStyle) -> Point {
        Point::new(
            self.col_width_l - self.height / 2.0 + style.graph_offset.x,
            style.graph_offset.y,
        )
    }

    /// The full canvas is returned as-is only when both labels fill their
    /// half of the base width; otherwise the output is cropped to the
    /// text extents.
    pub fn needs_crop(&self, style: &LogoStyle) -> bool {
        let half = style.base_width / 2.0;
        !(self.text_width_l + style.padding_x >= half
            && self.text_width_r + style.padding_x >= half)
    }

    /// Source x of the cropped blit. May be negative when only one side
    /// overflows its column; the uncovered band stays transparent.
    pub fn crop_origin_x(&self, style: &LogoStyle) -> f64 {
        style.base_width / 2.0 - self.text_width_l - style.padding_x
    }

    /// Size of the cropped output surface.
    pub fn cropped_size(&self, style: &LogoStyle) -> (f64, f64) {
        (
            self.text_width_l + self.text_width_r + 2.0 * style.padding_x,
            self.height,
        )
    }
}
