use bawiki_assets::AssetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("font parsing error: {0}")]
    Parse(String),

    #[error("no usable face among families {0:?}")]
    NoMatch(Vec<String>),

    #[error(transparent)]
    Asset(#[from] AssetError),
}
