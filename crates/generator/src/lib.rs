// Static site generation with Leptos SSR

pub mod components;
pub mod manifest;
pub mod style;

use blog_kit_core::{ArticleVariant, Breakpoints, ContentPage, Error, Result, Site, Theme};
use components::{Article, MANIFEST_PATH, Page};
use leptos::prelude::*;
use leptos::reactive::owner::Owner;

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

/// Render the article component on its own, without the page shell
pub fn render_article(
    theme: &Theme,
    breakpoints: Breakpoints,
    body: Option<&str>,
    variant: ArticleVariant,
    ad_script: &str,
) -> String {
    let theme = theme.clone();
    let body = body.map(str::to_string);
    let ad_script = ad_script.to_string();

    Owner::new().with(move || {
        view! {
            <Article
                theme=theme
                breakpoints=breakpoints
                body=body
                variant=variant
                ad_script=ad_script
            />
        }
        .to_html()
    })
}

/// Render a complete HTML document for one content page
pub fn render_page(site: &Site, page: &ContentPage, variant: ArticleVariant) -> String {
    let site = site.clone();
    let page = page.clone();

    let html = Owner::new().with(move || {
        view! { <Page site=site page=page variant=variant /> }.to_html()
    });
    format!("<!DOCTYPE html>{html}")
}

/// Render every content page plus the web manifest.
///
/// The article variant is chosen once by the caller and applies to all pages.
pub fn generate_site(
    site: &Site,
    pages: &[ContentPage],
    variant: ArticleVariant,
) -> Result<GeneratedSite> {
    let rendered = pages
        .iter()
        .map(|page| {
            tracing::debug!(slug = %page.slug, ?variant, "rendering page");
            (page.output_path(), render_page(site, page, variant))
        })
        .collect();

    let manifest = manifest::manifest_json(&site.config)
        .map_err(|e| Error::InvalidData(format!("Failed to serialize manifest: {}", e)))?;

    Ok(GeneratedSite {
        pages: rendered,
        assets: vec![(MANIFEST_PATH.to_string(), manifest)],
    })
}
