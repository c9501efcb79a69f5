use blog_kit_core::{ManifestDisplay, SiteConfig};
use serde::Serialize;

/// Web app manifest document
#[derive(Debug, Serialize)]
pub struct WebManifest<'a> {
    pub name: &'a str,
    pub short_name: &'a str,
    pub start_url: &'a str,
    pub background_color: &'a str,
    pub theme_color: &'a str,
    pub display: ManifestDisplay,
    pub lang: &'a str,
}

impl<'a> From<&'a SiteConfig> for WebManifest<'a> {
    fn from(config: &'a SiteConfig) -> Self {
        let manifest = &config.manifest;
        Self {
            name: &manifest.name,
            short_name: &manifest.short_name,
            start_url: &manifest.start_url,
            background_color: &manifest.background_color,
            theme_color: &manifest.theme_color,
            display: manifest.display,
            lang: &config.info.language,
        }
    }
}

pub fn manifest_json(config: &SiteConfig) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(&WebManifest::from(config))
}
