//! Asset fetching (HTTP, filesystem, Data URIs) for the bawiki toolkit.
//!
//! Provides the [`AssetSource`] seam the renderers draw their raster and
//! font resources through, plus [`Provider`], the default implementation
//! dispatching on URL scheme.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use data_url::DataUrl;
use peniko::Image;
use reqwest::Client;
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:60.0) Gecko/20100101 Firefox/81.0";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("data URL parsing error: {0:?}")]
    DataUrl(#[from] data_url::DataUrlError),
    #[error("base64 decode error: {0:?}")]
    DataUrlBase64(#[from] data_url::forgiving_base64::InvalidBase64),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Something that can resolve a URL to its raw bytes.
///
/// The logo compositor and the font registry only depend on this trait, so
/// hosts can substitute their own resolution (bundled resources, caches)
/// without touching the drawing code.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Bytes, AssetError>;
}

/// Default [`AssetSource`]: `data:` and `file:` URLs are resolved locally,
/// everything else goes through an HTTP client.
pub struct Provider {
    client: Client,
}

impl Provider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Route HTTP traffic through the given proxy URL.
    pub fn with_proxy(proxy: &str) -> Result<Self, AssetError> {
        let client = Client::builder()
            .proxy(reqwest::Proxy::all(proxy)?)
            .build()?;
        Ok(Self { client })
    }

    pub fn shared() -> Arc<dyn AssetSource> {
        Arc::new(Self::new())
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetSource for Provider {
    async fn fetch(&self, url: &Url) -> Result<Bytes, AssetError> {
        match url.scheme() {
            "data" => {
                let data_url = DataUrl::process(url.as_str())?;
                let decoded = data_url.decode_to_vec()?;
                Ok(Bytes::from(decoded.0))
            }
            "file" => {
                let file_content = tokio::fs::read(url.path()).await?;
                Ok(Bytes::from(file_content))
            }
            _ => {
                log::debug!("fetching {url}");
                let response = self
                    .client
                    .get(url.as_str())
                    .header("User-Agent", USER_AGENT)
                    .send()
                    .await?;
                Ok(response.error_for_status()?.bytes().await?)
            }
        }
    }
}

/// Decode raw encoded image bytes into an RGBA8 [`Image`].
pub fn decode_image(bytes: &[u8]) -> Result<Image, AssetError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(Image {
        data: peniko::Blob::new(Arc::new(decoded.into_raw())),
        format: peniko::ImageFormat::Rgba8,
        width,
        height,
        alpha: 1.0,
        x_extend: peniko::Extend::Pad,
        y_extend: peniko::Extend::Pad,
        quality: peniko::ImageQuality::Medium,
    })
}

/// Fetch and decode a raster asset in one step.
pub async fn fetch_image<S>(source: &S, url: &Url) -> Result<Image, AssetError>
where
    S: AssetSource + ?Sized,
{
    let bytes = source.fetch(url).await?;
    decode_image(&bytes)
}
