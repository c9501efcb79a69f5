use crate::error::{Error, Result};
use crate::theme::{StyleConfig, Theme};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSiteInfo,
    author: Author,
    header: Header,
    manifest: RawManifest,
    #[serde(default)]
    avatar: RawAvatar,
    #[serde(default)]
    social: Vec<SocialLink>,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    style: StyleConfig,
    #[serde(default)]
    article: ArticleConfig,
    #[serde(default)]
    ads: AdConfig,
}

#[derive(Debug, Deserialize)]
struct RawSiteInfo {
    title: String,
    short_title: String,
    description: String,
    url: String,
    image: Option<String>, // Convert to PathBuf
    language: Option<String>,
    path_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: String,
    short_name: String,
    start_url: Option<String>,
    background_color: Option<String>,
    theme_color: Option<String>,
    #[serde(default)]
    display: ManifestDisplay,
}

#[derive(Debug, Default, Deserialize)]
struct RawAvatar {
    gravatar: Option<String>,
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<Site> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<Site> {
    let raw: RawConfig = toml::from_str(content)?;

    require_text(&raw.site.title, "site.title")?;
    require_text(&raw.site.short_title, "site.short_title")?;
    require_text(&raw.author.name, "author.name")?;
    require_text(&raw.manifest.name, "manifest.name")?;
    require_text(&raw.manifest.short_name, "manifest.short_name")?;

    validate_url(&raw.site.url, "site.url")?;
    if let Some(gravatar) = &raw.avatar.gravatar {
        validate_url(gravatar, "avatar.gravatar")?;
    }
    for link in &raw.social {
        require_text(&link.name, "social.name")?;
        validate_url(&link.url, &format!("social.{}", link.name))?;
    }

    let image = validate_path(
        raw.site.image.as_deref().unwrap_or("preview.jpg"),
        "site.image",
    )?;

    let info = SiteInfo {
        title: raw.site.title,
        short_title: raw.site.short_title,
        description: raw.site.description,
        url: raw.site.url.trim_end_matches('/').to_string(),
        image,
        language: raw.site.language.unwrap_or_else(|| "en".to_string()),
        path_prefix: raw.site.path_prefix,
    };

    let manifest = Manifest {
        name: raw.manifest.name,
        short_name: raw.manifest.short_name,
        start_url: raw
            .manifest
            .start_url
            .unwrap_or_else(|| "/index.html".to_string()),
        background_color: raw
            .manifest
            .background_color
            .unwrap_or_else(|| "white".to_string()),
        theme_color: raw
            .manifest
            .theme_color
            .unwrap_or_else(|| "#666".to_string()),
        display: raw.manifest.display,
    };

    let author = Author {
        name: raw.author.name,
        twitter: raw
            .author
            .twitter
            .map(|handle| handle.trim_start_matches('@').to_string()),
    };

    tracing::debug!(
        title = %info.title,
        social_links = raw.social.len(),
        "parsed site configuration"
    );

    Ok(Site {
        config: SiteConfig {
            info,
            author,
            header: raw.header,
            manifest,
            gravatar: raw.avatar.gravatar,
            social: raw.social,
        },
        theme: raw.theme,
        style: raw.style,
        article: raw.article,
        ads: raw.ads,
    })
}

fn require_text(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Field '{}' must not be empty",
            field_name
        )));
    }
    Ok(())
}

/// Only absolute http(s) urls are accepted
fn validate_url(value: &str, field_name: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| {
        Error::ConfigParse(format!("Invalid url in '{}': '{}' ({})", field_name, value, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::ConfigParse(format!(
            "Unsupported url scheme '{}' in '{}': only http and https are allowed",
            scheme, field_name
        ))),
    }
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references so that
/// site.toml cannot point at files outside the site directory.
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
[site]
title = "Terodox.tech - for random technical musings"
short_title = "Terodox.tech - wicked tech bub"
description = "A site for cataloging the many technical musings"
url = "https://terodox.tech/"

[author]
name = "Andy Desmarais"
twitter = "@terodox"

[header]
title = "Andy Desmarais"
subtitle = "A code ninja and all around tech geek"

[manifest]
name = "Terodox.tech - for random technical musings"
short_name = "Terodox.tech"

[[social]]
name = "github"
url = "https://github.com/terodox"

[[social]]
name = "twitter"
url = "https://twitter.com/terodox"

[[social]]
name = "facebook"
url = "http://facebook.com/terodox"
"##;

    #[test]
    fn test_parse_minimal_config() {
        let site = parse_site_toml_str(MINIMAL).unwrap();
        let config = &site.config;

        assert_eq!(config.info.url, "https://terodox.tech");
        assert_eq!(config.info.image, PathBuf::from("preview.jpg"));
        assert_eq!(config.info.language, "en");
        assert_eq!(config.author.twitter.as_deref(), Some("terodox"));
        assert_eq!(config.manifest.start_url, "/index.html");
        assert_eq!(config.manifest.background_color, "white");
        assert_eq!(config.manifest.theme_color, "#666");
        assert_eq!(config.manifest.display, ManifestDisplay::Standalone);
        assert_eq!(site.article.variant, ArticleVariant::Plain);
        assert_eq!(site.ads.codefund_property, 541);
        assert_eq!(site.style.breakpoints.tablet, 600);
        assert_eq!(site.style.font_family, "Open Sans");
    }

    #[test]
    fn test_social_links_keep_order() {
        let site = parse_site_toml_str(MINIMAL).unwrap();
        let names: Vec<&str> = site
            .config
            .social
            .iter()
            .map(|link| link.name.as_str())
            .collect();
        assert_eq!(names, ["github", "twitter", "facebook"]);
    }

    #[test]
    fn test_avatar_falls_back_to_default() {
        let site = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(site.config.avatar_src(), DEFAULT_AVATAR);

        let toml = format!(
            "{}\n[avatar]\ngravatar = \"https://s.gravatar.com/avatar/e07a26bb\"\n",
            MINIMAL
        );
        let site = parse_site_toml_str(&toml).unwrap();
        assert_eq!(
            site.config.avatar_src(),
            "https://s.gravatar.com/avatar/e07a26bb"
        );
    }

    #[test]
    fn test_parse_theme_and_variant_sections() {
        let toml = format!(
            r#"{}
[theme.space]
default = "2rem"

[theme.space.inset]
default = "1rem"

[theme.text.max_width]
tablet = "600px"
desktop = "1024px"

[article]
variant = "with-ad"

[ads]
codefund_property = 42
"#,
            MINIMAL
        );

        let site = parse_site_toml_str(&toml).unwrap();
        assert_eq!(site.theme.space.default, "2rem");
        assert_eq!(site.theme.space.inset.default, "1rem");
        assert_eq!(site.theme.text.max_width.desktop, "1024px");
        assert_eq!(site.article.variant, ArticleVariant::WithAd);
        assert_eq!(
            site.ads.script_src(),
            "https://codefund.io/properties/42/funder.js"
        );
    }

    #[test]
    fn test_parse_rejects_empty_title() {
        let toml = MINIMAL.replace(
            "title = \"Terodox.tech - for random technical musings\"",
            "title = \"  \"",
        );
        let result = parse_site_toml_str(&toml);
        assert!(result.unwrap_err().to_string().contains("site.title"));
    }

    #[test]
    fn test_parse_rejects_bad_social_url() {
        let toml = MINIMAL.replace("https://github.com/terodox", "github.com/terodox");
        let err = parse_site_toml_str(&toml).unwrap_err().to_string();
        assert!(err.contains("social.github"));
    }

    #[test]
    fn test_parse_rejects_non_http_url() {
        let toml = MINIMAL.replace("https://terodox.tech/", "ftp://terodox.tech/");
        let err = parse_site_toml_str(&toml).unwrap_err().to_string();
        assert!(err.contains("Unsupported url scheme"));
    }

    #[test]
    fn test_parse_rejects_image_traversal() {
        let toml = MINIMAL.replace(
            "url = \"https://terodox.tech/\"",
            "url = \"https://terodox.tech/\"\nimage = \"../../etc/passwd\"",
        );
        let err = parse_site_toml_str(&toml).unwrap_err().to_string();
        assert!(err.contains("Parent directory references"));
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("images/preview.jpg", "site.image").is_ok());
        assert!(
            validate_path("/etc/passwd", "site.image")
                .unwrap_err()
                .to_string()
                .contains("Absolute paths not allowed")
        );
        assert!(
            validate_path("   ", "site.image")
                .unwrap_err()
                .to_string()
                .contains("Empty path")
        );
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let toml = MINIMAL.replace("[header]", "[heading]");
        assert!(matches!(
            parse_site_toml_str(&toml),
            Err(Error::ConfigParse(_))
        ));
    }
}
