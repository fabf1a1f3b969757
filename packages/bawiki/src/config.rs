use std::path::{Path, PathBuf};

use bawiki_assets::Provider;
use bawiki_font::FontBook;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("bad asset URL: {0}")]
    AssetUrl(#[from] url::ParseError),

    #[error(transparent)]
    Asset(#[from] bawiki_assets::AssetError),

    #[error(transparent)]
    Font(#[from] bawiki_font::FontError),
}

/// Plugin configuration, loadable from a TOML file.
///
/// Everything is optional: the defaults run with bundled graphics, no
/// proxy, and system fonts only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Proxy URL for all HTTP asset traffic.
    pub proxy: Option<String>,
    /// Base URL the halo/cross graphics are fetched from. When unset the
    /// bundled graphics are used.
    pub asset_base: Option<Url>,
    /// Extra font files to register ahead of the system fonts.
    pub font_files: Vec<PathBuf>,
}

impl PluginConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn provider(&self) -> Result<Provider, ConfigError> {
        Ok(match &self.proxy {
            Some(proxy) => Provider::with_proxy(proxy)?,
            None => Provider::new(),
        })
    }

    /// The halo/cross URLs under [`PluginConfig::asset_base`], when one
    /// is configured.
    pub fn asset_urls(&self) -> Result<Option<(Url, Url)>, ConfigError> {
        let Some(base) = &self.asset_base else {
            return Ok(None);
        };
        Ok(Some((base.join("logo/halo.png")?, base.join("logo/cross.png")?)))
    }

    /// A font book with the configured font files registered ahead of the
    /// system fonts.
    pub fn font_book(&self) -> Result<FontBook, ConfigError> {
        let mut book = FontBook::new();
        for path in &self.font_files {
            book.register_file(path)?;
        }
        book.load_system_fonts();
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: PluginConfig = toml::from_str(
            "proxy = \"http://127.0.0.1:7890\"\n\
             asset_base = \"https://bawiki.res/\"\n\
             font_files = [\"/srv/fonts/RoGSanSerifStd.otf\"]\n",
        )
        .unwrap();
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:7890"));
        let (halo, cross) = config.asset_urls().unwrap().unwrap();
        assert_eq!(halo.as_str(), "https://bawiki.res/logo/halo.png");
        assert_eq!(cross.as_str(), "https://bawiki.res/logo/cross.png");
        assert_eq!(config.font_files.len(), 1);
    }

    #[test]
    fn loads_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bawiki.toml");
        std::fs::write(&path, "proxy = \"http://localhost:1080\"").unwrap();
        let config = PluginConfig::from_file(&path).unwrap();
        assert_eq!(config.proxy.as_deref(), Some("http://localhost:1080"));
    }

    #[test]
    fn defaults_are_empty() {
        let config = PluginConfig::default();
        assert!(config.proxy.is_none());
        assert!(config.asset_urls().unwrap().is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<PluginConfig>("unknown = 1").is_err());
    }
}
