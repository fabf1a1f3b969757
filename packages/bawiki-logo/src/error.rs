use anycanvas_skia::PngEncodeError;
use bawiki_assets::AssetError;
use bawiki_font::FontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("could not allocate a {0}x{1} canvas")]
    Surface(u32, u32),

    #[error(transparent)]
    Encode(#[from] PngEncodeError),
}
