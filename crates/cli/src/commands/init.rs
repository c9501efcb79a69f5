use super::{CONTENT_DIR, SITE_TOML, STATIC_DIR};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TITLE: &str = "My Blog";
const DEFAULT_AUTHOR: &str = "Your Name";

/// Escape a string for a TOML basic string.
///
/// The template keeps its comments, so it is written by hand instead of
/// being serialized with the toml crate.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Manifest short names are kept to 12 characters
fn short_name(title: &str) -> String {
    title.chars().take(12).collect::<String>().trim_end().to_string()
}

/// Initialize a new site directory.
///
/// Creates `site.toml`, `content/index.html` and an empty `static/`
/// directory. The directory is created when missing; an existing
/// `site.toml` is never overwritten.
pub async fn run(path: PathBuf, title: Option<String>, author: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    create_directory_structure(&path)?;
    generate_site_toml(
        &path,
        title.as_deref().unwrap_or(DEFAULT_TITLE),
        author.as_deref().unwrap_or(DEFAULT_AUTHOR),
    )?;
    generate_index_page(&path)?;

    tracing::info!(path = %path.display(), "site initialized");

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit titles, author and social links");
    println!("  ├── content/");
    println!("  │   └── index.html       ← Page bodies are HTML fragments");
    println!("  └── static/              ← Add preview.jpg and images here");

    println!("\nNext steps:");
    println!("  1. Edit site.toml");
    println!("  2. Add static/preview.jpg");
    println!("  3. Preview: blog-kit preview {}", path.display());

    Ok(())
}

fn create_directory_structure(base: &Path) -> Result<()> {
    fs::create_dir_all(base.join(CONTENT_DIR)).context("Failed to create content directory")?;
    fs::create_dir_all(base.join(STATIC_DIR)).context("Failed to create static directory")?;
    Ok(())
}

fn generate_site_toml(base: &Path, title: &str, author: &str) -> Result<()> {
    let short = toml_escape_string(&short_name(title));
    let title = toml_escape_string(title);
    let author = toml_escape_string(author);

    let content = format!(
        r##"# Site metadata
[site]
title = "{title}"              # <title> on the index page
short_title = "{short}"        # <title> ending for posts and pages
description = "A place for technical musings"
url = "https://example.com"
image = "preview.jpg"          # relative to static/
language = "en"

[author]
name = "{author}"
# twitter = "handle"

[header]
title = "{author}"
subtitle = "Writing about code"

# manifest.webmanifest
[manifest]
name = "{title}"
short_name = "{short}"         # max 12 characters
start_url = "/index.html"
background_color = "white"
theme_color = "#666"
display = "standalone"

# Uses static/images/jpg/avatar.jpg when no gravatar is set
# [avatar]
# gravatar = "https://s.gravatar.com/avatar/<md5>"

[[social]]
name = "github"
url = "https://github.com/"

# Design tokens, all optional
[theme.space]
default = "16px"

[theme.space.inset]
default = "16px"

[theme.text.max_width]
tablet = "600px"
desktop = "700px"

[style]
font_family = "Open Sans"

[style.breakpoints]
tablet = 600
desktop = 1024

[article]
variant = "plain"              # or "with-ad"

[ads]
codefund_property = 541
"##
    );

    fs::write(base.join(SITE_TOML), content).context("Failed to write site.toml")?;
    println!("✓ Created {}", SITE_TOML);
    Ok(())
}

fn generate_index_page(base: &Path) -> Result<()> {
    let index = base.join(CONTENT_DIR).join("index.html");
    if index.exists() {
        return Ok(());
    }

    fs::write(
        &index,
        "<!-- title: Welcome -->\n<h1>Welcome</h1>\n<p>Your first page.</p>\n",
    )
    .context("Failed to write content/index.html")?;
    println!("✓ Created content/index.html");
    Ok(())
}
