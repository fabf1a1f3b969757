use bawiki_assets::{AssetError, AssetSource, decode_image, fetch_image};
use peniko::Image;
use url::Url;

/// Decoded halo and cross graphics, sized to the canvas height when drawn.
pub struct LogoAssets {
    pub halo: Image,
    pub cross: Image,
}

const BUILTIN_HALO: &[u8] = include_bytes!("../assets/halo.png");
const BUILTIN_CROSS: &[u8] = include_bytes!("../assets/cross.png");

impl LogoAssets {
    /// Fetch both graphics, joined: either failure fails the load as a
    /// whole and nothing is drawn. There is no retry.
    pub async fn load<S>(source: &S, halo_url: &Url, cross_url: &Url) -> Result<Self, AssetError>
    where
        S: AssetSource + ?Sized,
    {
        let (halo, cross) = tokio::try_join!(
            fetch_image(source, halo_url),
            fetch_image(source, cross_url)
        )?;
        Ok(Self { halo, cross })
    }

    /// The graphics bundled with the crate, for deployments without a
    /// resource directory.
    pub fn builtin() -> Result<Self, AssetError> {
        Ok(Self {
            halo: decode_image(BUILTIN_HALO)?,
            cross: decode_image(BUILTIN_CROSS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_assets_decode() {
        let assets = LogoAssets::builtin().unwrap();
        assert!(assets.halo.width > 0);
        assert_eq!((assets.cross.width, assets.cross.height), (assets.halo.width, assets.halo.height));
    }

    #[tokio::test]
    async fn loads_both_images_through_an_asset_source() {
        let mut pixmap = tiny_skia::Pixmap::new(2, 2).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        let png = pixmap.encode_png().unwrap();
        let data_url = {
            use base64::Engine as _;
            let payload = base64::engine::general_purpose::STANDARD.encode(&png);
            Url::parse(&format!("data:image/png;base64,{payload}")).unwrap()
        };

        let provider = bawiki_assets::Provider::new();
        let assets = LogoAssets::load(&provider, &data_url, &data_url).await.unwrap();
        assert_eq!((assets.halo.width, assets.halo.height), (2, 2));
    }

    #[tokio::test]
    async fn load_fails_as_a_whole_when_one_image_is_missing() {
        let provider = bawiki_assets::Provider::new();
        let good = Url::parse("data:image/png;base64,").unwrap();
        let missing = Url::parse("file:///no/such/cross.png").unwrap();
        assert!(LogoAssets::load(&provider, &missing, &good).await.is_err());
    }
}
