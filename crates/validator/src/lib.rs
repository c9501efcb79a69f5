// Validation logic: checks that parse fine but would still produce a broken site

use blog_kit_core::{ContentPage, DEFAULT_AVATAR, Site};
use std::collections::HashSet;
use std::path::Path;

/// Longest short name most launchers display without truncation
const MAX_SHORT_NAME: usize = 12;

const COLOR_KEYWORDS: &[&str] = &[
    "white", "black", "gray", "grey", "silver", "red", "green", "blue", "navy", "teal",
    "purple", "orange", "yellow", "transparent",
];

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a loaded site against its directory and content.
///
/// `site_dir` is the directory holding `site.toml`; static assets are
/// expected under `static/`.
pub fn validate_site(site_dir: &Path, site: &Site, pages: &[ContentPage]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let config = &site.config;

    check_site_image(&site_dir.join("static").join(&config.info.image), &mut report);

    let short_name = config.manifest.short_name.chars().count();
    if short_name > MAX_SHORT_NAME {
        report.warnings.push(format!(
            "manifest.short_name '{}' is {} characters, launchers truncate after {}",
            config.manifest.short_name, short_name, MAX_SHORT_NAME
        ));
    }

    if !is_color(&config.manifest.theme_color) {
        report.warnings.push(format!(
            "manifest.theme_color '{}' is neither a hex color nor a known keyword",
            config.manifest.theme_color
        ));
    }

    let mut seen = HashSet::new();
    for link in &config.social {
        if !seen.insert(link.name.to_lowercase()) {
            report
                .warnings
                .push(format!("Duplicate social link '{}'", link.name));
        }
    }

    if config.gravatar.is_none() {
        report.info.push(format!(
            "No gravatar configured, using {}",
            DEFAULT_AVATAR
        ));
    }

    if pages.is_empty() {
        report.warnings.push("No content pages found".to_string());
    } else {
        report.info.push(format!("{} content page(s)", pages.len()));
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

fn check_site_image(path: &Path, report: &mut ValidationReport) {
    if !path.exists() {
        report
            .errors
            .push(format!("Site image not found: {}", path.display()));
        return;
    }

    match image::image_dimensions(path) {
        Ok((width, height)) => report
            .info
            .push(format!("Site image {}x{}: {}", width, height, path.display())),
        Err(e) => report.errors.push(format!(
            "Site image is not readable: {} ({})",
            path.display(),
            e
        )),
    }
}

fn is_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    COLOR_KEYWORDS.contains(&value.to_lowercase().as_str())
}
