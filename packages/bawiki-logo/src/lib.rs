//! The halo-logo compositor.
//!
//! Given two labels, the compositor measures them, sizes a canvas so each
//! text column gets at least half the base width, draws the slanted
//! bicolor labels, overlays the halo graphic, punches the parallelogram
//! notch through it, overlays the cross graphic, optionally crops to the
//! text extents, and serializes the result as a `base64://` image payload.
//!
//! Drawing goes through the [`anycanvas::Canvas`] abstraction; the
//! geometry lives in [`LogoLayout`] and is independently testable. Every
//! invocation is stateless: fresh metrics, fresh surface, no shared
//! mutable state.

mod assets;
mod error;
mod layout;
mod paint;
mod renderer;
mod style;

pub use assets::LogoAssets;
pub use error::LogoError;
pub use layout::LogoLayout;
pub use paint::{LabelOutlines, LogoOptions, paint_logo};
pub use renderer::{BASE64_SCHEME, LogoRenderer};
pub use style::LogoStyle;
