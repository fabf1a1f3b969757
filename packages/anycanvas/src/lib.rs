//! 2D canvas abstraction for the bawiki rendering crates.
//!
//! A [`Canvas`] is a rectangular raster surface that accepts drawing
//! commands: path fills and strokes under an arbitrary affine transform,
//! with per-operation composite control (paint vs erase), and image blits.
//! Backends (e.g. `anycanvas_skia`) execute the commands against a concrete
//! pixel buffer; callers such as the logo compositor stay backend-agnostic.
//!
//! Transforms are arguments to each operation rather than ambient canvas
//! state, so there is no save/restore stack to unbalance: every drawing
//! call is self-contained and restoration is guaranteed by construction.

use kurbo::{Affine, Rect, Shape, Stroke};
use peniko::{Color, Image};

pub use peniko::Compose;

/// What to paint with: a solid color or a raster image.
#[derive(Clone, Copy, Debug)]
pub enum Brush<'a> {
    Solid(Color),
    Image(&'a Image),
}

impl From<Color> for Brush<'_> {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl<'a> From<&'a Image> for Brush<'a> {
    fn from(image: &'a Image) -> Self {
        Brush::Image(image)
    }
}

/// A 2D raster drawing surface.
///
/// The composite mode chooses between painting over existing pixels
/// ([`Compose::SrcOver`]) and erasing them in the shape of the new content
/// ([`Compose::DestOut`]). Backends may support further modes; these two
/// are the ones every implementation must handle.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Reset every pixel to transparent black.
    fn clear(&mut self);

    /// Fill `shape` (non-zero winding) under `transform`.
    fn fill<'a>(
        &mut self,
        compose: Compose,
        transform: Affine,
        brush: impl Into<Brush<'a>>,
        shape: &impl Shape,
    );

    /// Stroke the outline of `shape` under `transform`.
    fn stroke<'a>(
        &mut self,
        compose: Compose,
        style: &Stroke,
        transform: Affine,
        brush: impl Into<Brush<'a>>,
        shape: &impl Shape,
    );

    /// Blit `image` into `dest`, scaling as needed. Always composes
    /// src-over with bilinear filtering.
    fn draw_image(&mut self, image: &Image, dest: Rect);
}
