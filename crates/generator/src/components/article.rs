use crate::components::AdSlot;
use crate::style::article_style;
use blog_kit_core::{ArticleVariant, Breakpoints, Theme};
use leptos::either::Either;
use leptos::prelude::*;

/// Article container with responsive padding and width.
///
/// `body` is trusted HTML and is emitted unmodified. A missing body is
/// reported as a warning and renders an empty article.
#[component]
pub fn Article(
    theme: Theme,
    breakpoints: Breakpoints,
    body: Option<String>,
    #[prop(optional)] variant: ArticleVariant,
    /// Script loaded into the ad slot, only used by [`ArticleVariant::WithAd`]
    #[prop(optional)]
    ad_script: String,
) -> impl IntoView {
    let body = body.unwrap_or_else(|| {
        tracing::warn!("Article rendered without a body");
        String::new()
    });
    let css = article_style(&theme, breakpoints).to_string();

    // An optional slot renders a `<!>` marker in front of the article when empty
    match variant {
        ArticleVariant::Plain => Either::Left(view! {
            <article class="article" inner_html=body></article>
            <style inner_html=css></style>
        }),
        ArticleVariant::WithAd => Either::Right(view! {
            <AdSlot theme=theme breakpoints=breakpoints script_src=ad_script />
            <article class="article" inner_html=body></article>
            <style inner_html=css></style>
        }),
    }
}
