pub mod build;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};
use blog_kit_core::{ArticleVariant, ContentPage, Site, load_content, parse_site_toml};
use std::path::Path;

pub const SITE_TOML: &str = "site.toml";
pub const CONTENT_DIR: &str = "content";
pub const STATIC_DIR: &str = "static";

/// Load site.toml and the content fragments of a site directory
pub fn load_site(path: &Path) -> Result<(Site, Vec<ContentPage>)> {
    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site_toml_path = path.join(SITE_TOML);
    if !site_toml_path.exists() {
        anyhow::bail!(
            "site.toml not found in {}\nRun 'blog-kit init {}' first",
            path.display(),
            path.display()
        );
    }

    let site = parse_site_toml(&site_toml_path).context("Failed to parse site.toml")?;
    let pages = load_content(path.join(CONTENT_DIR)).context("Failed to load content")?;

    Ok((site, pages))
}

/// The single place the article variant is decided
pub fn resolve_variant(site: &Site, cli_override: Option<ArticleVariant>) -> ArticleVariant {
    cli_override.unwrap_or(site.article.variant)
}
