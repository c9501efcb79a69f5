use crate::theme::{StyleConfig, Theme};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Asset used when no gravatar is configured
pub const DEFAULT_AVATAR: &str = "/images/jpg/avatar.jpg";

/// Ad network script endpoint, `{}` is the property id
const CODEFUND_SCRIPT: &str = "https://codefund.io/properties/{}/funder.js";

/// Complete, validated site: metadata plus the tokens handed to components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub config: SiteConfig,
    pub theme: Theme,
    pub style: StyleConfig,
    pub article: ArticleConfig,
    pub ads: AdConfig,
}

/// Site metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub info: SiteInfo,
    pub author: Author,
    pub header: Header,
    pub manifest: Manifest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar: Option<String>,
    pub social: Vec<SocialLink>,
}

impl SiteConfig {
    /// Avatar image source, falling back to the bundled asset
    pub fn avatar_src(&self) -> &str {
        self.gravatar.as_deref().unwrap_or(DEFAULT_AVATAR)
    }
}

/// Titles, description and canonical url
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Full `<title>` used on the index page
    pub title: String,
    /// `<title>` suffix for posts and pages
    pub short_title: String,
    pub description: String,
    pub url: String,
    /// Preview image, relative to `static/`
    pub image: PathBuf,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
}

/// Author identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    /// Twitter handle without the leading `@`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Header text shown above every page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
}

/// Progressive web app manifest fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub background_color: String,
    pub theme_color: String,
    pub display: ManifestDisplay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestDisplay {
    Fullscreen,
    #[default]
    Standalone,
    MinimalUi,
    Browser,
}

/// Social profile link, rendered in configuration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Which article component renders content pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArticleVariant {
    #[default]
    Plain,
    WithAd,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleConfig {
    #[serde(default)]
    pub variant: ArticleVariant,
}

/// Ad slot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdConfig {
    #[serde(default = "default_codefund_property")]
    pub codefund_property: u32,
}

impl Default for AdConfig {
    fn default() -> Self {
        Self {
            codefund_property: default_codefund_property(),
        }
    }
}

impl AdConfig {
    /// Script url the ad slot loads asynchronously
    pub fn script_src(&self) -> String {
        CODEFUND_SCRIPT.replace("{}", &self.codefund_property.to_string())
    }
}

fn default_codefund_property() -> u32 {
    541
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_src() {
        assert_eq!(
            AdConfig::default().script_src(),
            "https://codefund.io/properties/541/funder.js"
        );
    }

    #[test]
    fn test_variant_names() {
        let variant: ArticleConfig = toml::from_str(r#"variant = "with-ad""#).unwrap();
        assert_eq!(variant.variant, ArticleVariant::WithAd);

        let variant: ArticleConfig = toml::from_str("").unwrap();
        assert_eq!(variant.variant, ArticleVariant::Plain);
    }
}
