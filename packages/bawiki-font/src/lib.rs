//! Font management for the bawiki renderers.
//!
//! [`FontBook`] owns raw font binaries (registered from bytes, files,
//! fetched assets, or a system-directory scan) and resolves ordered family
//! lists into a [`FontStack`]. A stack measures text and converts it to
//! filled outline paths; metrics are recomputed per call and never cached,
//! so every rendering run observes exactly the faces registered at the
//! time it resolves.
//!
//! Registration is awaited before resolution, which is what makes text
//! measurement safe: a face either finished loading or is not part of the
//! stack at all.

mod book;
mod error;
mod metrics;
mod outline;
mod system;

pub use book::{FontBook, FontStack};
pub use error::FontError;
pub use metrics::TextMetrics;
