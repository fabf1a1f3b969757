//! An anycanvas backend using the tiny-skia crate
mod canvas;

pub use canvas::{PngEncodeError, SkiaCanvas};

pub use tiny_skia;
