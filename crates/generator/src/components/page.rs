use crate::components::Article;
use crate::style::page_style;
use blog_kit_core::{ArticleVariant, ContentPage, Site, SiteConfig, SocialLink};
use leptos::either::Either;
use leptos::prelude::*;

pub const MANIFEST_PATH: &str = "manifest.webmanifest";

/// `<title>` text: the full site title on the index page, otherwise the
/// page title followed by the short site title
pub fn page_title(config: &SiteConfig, page: &ContentPage) -> String {
    if page.slug == "index" {
        config.info.title.clone()
    } else {
        format!("{} - {}", page.title, config.info.short_title)
    }
}

fn prefixed(prefix: Option<&str>, path: &str) -> String {
    let prefix = prefix.unwrap_or("").trim_end_matches('/');
    format!("{}/{}", prefix, path.trim_start_matches('/'))
}

/// Full HTML document for one content page
#[component]
pub fn Page(site: Site, page: ContentPage, variant: ArticleVariant) -> impl IntoView {
    let title = page_title(&site.config, &page);
    let config = site.config;
    let prefix = config.info.path_prefix.as_deref();

    let manifest_href = prefixed(prefix, MANIFEST_PATH);
    let image_url = format!(
        "{}{}",
        config.info.url,
        prefixed(prefix, &config.info.image.to_string_lossy())
    );
    let avatar = match &config.gravatar {
        Some(url) => url.clone(),
        None => prefixed(prefix, config.avatar_src()),
    };
    let twitter = match &config.author.twitter {
        Some(handle) => Either::Left(view! {
            <meta name="twitter:card" content="summary" />
            <meta name="twitter:image" content=image_url />
            <meta name="twitter:creator" content=format!("@{handle}") />
        }),
        None => Either::Right(view! {
            <meta name="twitter:card" content="summary" />
            <meta name="twitter:image" content=image_url />
        }),
    };
    let body_css = page_style(&site.style).to_string();
    let ad_script = site.ads.script_src();

    view! {
        <html lang=config.info.language.clone()>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title}</title>
                <meta name="description" content=config.info.description.clone() />
                <meta name="author" content=config.author.name.clone() />
                <meta name="theme-color" content=config.manifest.theme_color.clone() />
                {twitter}
                <link rel="manifest" href=manifest_href />
                <style inner_html=body_css></style>
            </head>
            <body>
                <header class="header">
                    <img class="avatar" src=avatar alt=config.author.name.clone() />
                    <h1>{config.header.title.clone()}</h1>
                    <h2>{config.header.subtitle.clone()}</h2>
                </header>
                <Article
                    theme=site.theme
                    breakpoints=site.style.breakpoints
                    body=Some(page.body)
                    variant=variant
                    ad_script=ad_script
                />
                <SocialLinks links=config.social />
            </body>
        </html>
    }
}

/// Footer list of social profiles, in configuration order
#[component]
pub fn SocialLinks(links: Vec<SocialLink>) -> impl IntoView {
    view! {
        <footer class="footer">
            <ul class="social">
                {links
                    .into_iter()
                    .map(|link| {
                        view! {
                            <li>
                                <a href=link.url rel="me">{link.name}</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </footer>
    }
}
