//! High-level APIs for the bawiki screenshot-bot rendering toolkit.
//!
//! The member crates do the work; this crate wires them together from a
//! [`PluginConfig`] and re-exports their surfaces:
//!
//! - [`logo`] composites the two-tone halo logo and serializes it
//! - [`prepare`] cleans wiki pages up before the host captures them
//! - [`dom`], [`font`], [`assets`] are the shared substrate

mod config;

pub use config::{ConfigError, PluginConfig};

pub use anycanvas;
pub use anycanvas_skia;
pub use bawiki_assets as assets;
pub use bawiki_dom as dom;
pub use bawiki_font as font;
pub use bawiki_logo as logo;
pub use bawiki_prepare as prepare;

use bawiki_logo::{LogoAssets, LogoError, LogoOptions, LogoRenderer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BawikiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logo(#[from] LogoError),
}

/// One-call logo generation: resolve fonts and graphics from `config`,
/// render, and return the `base64://` payload.
pub async fn generate_logo(
    config: &PluginConfig,
    text_l: &str,
    text_r: &str,
    transparent_bg: bool,
) -> Result<String, BawikiError> {
    let fonts = config.font_book()?;
    let assets = match config.asset_urls()? {
        Some((halo_url, cross_url)) => {
            let provider = config.provider()?;
            LogoAssets::load(&provider, &halo_url, &cross_url)
                .await
                .map_err(LogoError::from)?
        }
        None => LogoAssets::builtin().map_err(LogoError::from)?,
    };
    let renderer = LogoRenderer::new(fonts, assets);
    Ok(renderer.render(text_l, text_r, &LogoOptions { transparent_bg })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generates_a_logo_with_defaults() {
        let config = PluginConfig::default();
        if config.font_book().map(|book| book.is_empty()).unwrap_or(true) {
            // No system fonts on this host.
            return;
        }
        let output = generate_logo(&config, "Sensei", "Blue Archive", true)
            .await
            .unwrap();
        assert!(output.starts_with(bawiki_logo::BASE64_SCHEME));
        assert!(output.len() > bawiki_logo::BASE64_SCHEME.len());
    }

    #[tokio::test]
    async fn missing_remote_assets_fail_the_operation() {
        let config: PluginConfig =
            toml::from_str("asset_base = \"file:///definitely/missing/\"").unwrap();
        let result = generate_logo(&config, "a", "b", true).await;
        assert!(matches!(
            result,
            Err(BawikiError::Logo(LogoError::Asset(_)))
        ));
    }
}
