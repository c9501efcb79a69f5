use crate::style::ad_slot_style;
use blog_kit_core::{Breakpoints, Theme};
use leptos::prelude::*;

/// Fixed-size placeholder plus the async script that fills it
#[component]
pub fn AdSlot(theme: Theme, breakpoints: Breakpoints, script_src: String) -> impl IntoView {
    let css = ad_slot_style(&theme, breakpoints).to_string();

    view! {
        <div id="codefund"></div>
        <script src=script_src async=true></script>
        <style inner_html=css></style>
    }
}
