use anycanvas::{Canvas, Compose};
use kurbo::{Affine, BezPath, Cap, Join, Point, Rect, Stroke};
use peniko::color::palette;

use crate::assets::LogoAssets;
use crate::layout::LogoLayout;
use crate::style::LogoStyle;

/// Output options for one render.
#[derive(Debug, Clone, Copy)]
pub struct LogoOptions {
    /// Leave the background transparent and carve the right label's
    /// outline and the notch out of the underlying pixels.
    pub transparent_bg: bool,
}

impl Default for LogoOptions {
    fn default() -> Self {
        Self {
            transparent_bg: true,
        }
    }
}

/// The two label outlines, baseline at y = 0, starting at x = 0.
///
/// `left_width` is the left label's measured advance width; the left
/// column is right-aligned with it.
pub struct LabelOutlines {
    pub left: BezPath,
    pub left_width: f64,
    pub right: BezPath,
}

/// Push the whole composition into `canvas`.
///
/// Draw order matters: left label, halo, right label (outline then fill),
/// notch, cross. On transparent output the right outline and the notch
/// are composed destination-out, erasing the halo/background below them;
/// on opaque output both paint plain white.
pub fn paint_logo(
    canvas: &mut impl Canvas,
    style: &LogoStyle,
    layout: &LogoLayout,
    assets: &LogoAssets,
    labels: &LabelOutlines,
    opts: &LogoOptions,
) {
    let shear = Affine::new([1.0, 0.0, style.horizontal_tilt, 1.0, 0.0, 0.0]);
    let baseline_y = layout.height * style.text_baseline;
    let cutout = if opts.transparent_bg {
        Compose::DestOut
    } else {
        Compose::SrcOver
    };

    if !opts.transparent_bg {
        canvas.fill(
            Compose::SrcOver,
            Affine::IDENTITY,
            palette::css::WHITE,
            &Rect::new(0.0, 0.0, layout.width, layout.height),
        );
    }

    // Left label, right-aligned against the column boundary.
    let left_anchor = Affine::translate((layout.col_width_l - labels.left_width, baseline_y));
    canvas.fill(
        Compose::SrcOver,
        shear * left_anchor,
        style.left_color,
        &labels.left,
    );

    let graph = layout.graph_pos(style);
    let graph_rect = Rect::new(
        graph.x,
        graph.y,
        graph.x + layout.height,
        graph.y + layout.height,
    );
    canvas.draw_image(&assets.halo, graph_rect);

    // Right label: outline first so the fill stays intact on top of it.
    let right_anchor = Affine::translate((layout.col_width_l, baseline_y));
    let stroke = Stroke::new(style.outline_width)
        .with_caps(Cap::Butt)
        .with_join(Join::Miter)
        .with_miter_limit(10.0);
    canvas.stroke(
        cutout,
        &stroke,
        shear * right_anchor,
        style.outline_color,
        &labels.right,
    );
    canvas.fill(
        Compose::SrcOver,
        shear * right_anchor,
        style.right_color,
        &labels.right,
    );

    // Notch through the halo.
    let mut notch = BezPath::new();
    for (i, corner) in style.hollow_quad.iter().enumerate() {
        let p = Point::new(graph.x + corner.x / 2.0, graph.y + corner.y / 2.0);
        if i == 0 {
            notch.move_to(p);
        } else {
            notch.line_to(p);
        }
    }
    notch.close_path();
    canvas.fill(cutout, Affine::IDENTITY, style.outline_color, &notch);

    canvas.draw_image(&assets.cross, graph_rect);
}
