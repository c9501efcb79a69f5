use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const TITLE_MARKER: &str = "<!-- title:";

/// A content page: an opaque HTML fragment placed inside an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPage {
    pub slug: String,
    pub title: String,
    pub body: String,
}

impl ContentPage {
    /// Build a page from a fragment, reading the title from a leading
    /// `<!-- title: ... -->` comment when present
    pub fn from_fragment(slug: &str, body: String) -> Self {
        let title = extract_title(&body).unwrap_or_else(|| slug.replace(['-', '_'], " "));
        Self {
            slug: slug.to_string(),
            title,
            body,
        }
    }

    /// Output path relative to the site root
    pub fn output_path(&self) -> String {
        if self.slug == "index" {
            "index.html".to_string()
        } else {
            format!("{}/index.html", self.slug)
        }
    }
}

fn extract_title(body: &str) -> Option<String> {
    let rest = body.trim_start().strip_prefix(TITLE_MARKER)?;
    let end = rest.find("-->")?;
    let title = rest[..end].trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Load every `*.html` fragment directly inside `dir`, sorted by slug
pub fn load_content<P: AsRef<Path>>(dir: P) -> Result<Vec<ContentPage>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidData(format!(
            "Content directory does not exist: {}",
            dir.display()
        )));
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::InvalidData(e.to_string()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some("html")
        {
            continue;
        }

        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping content file with non-utf8 name");
            continue;
        };

        let body = fs::read_to_string(path)?;
        pages.push(ContentPage::from_fragment(slug, body));
    }

    tracing::debug!(count = pages.len(), dir = %dir.display(), "loaded content pages");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_comment() {
        let page = ContentPage::from_fragment(
            "hello-world",
            "<!-- title: Hello, World -->\n<p>Hi</p>".to_string(),
        );
        assert_eq!(page.title, "Hello, World");
        assert!(page.body.contains("<p>Hi</p>"));
    }

    #[test]
    fn test_title_from_slug() {
        let page = ContentPage::from_fragment("about_me-now", "<p>Hi</p>".to_string());
        assert_eq!(page.title, "about me now");
    }

    #[test]
    fn test_output_path() {
        let index = ContentPage::from_fragment("index", String::new());
        assert_eq!(index.output_path(), "index.html");
        let about = ContentPage::from_fragment("about", String::new());
        assert_eq!(about.output_path(), "about/index.html");
    }

    #[test]
    fn test_load_content_sorted_html_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zeta.html"), "<p>z</p>").unwrap();
        fs::write(dir.path().join("alpha.html"), "<p>a</p>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.html"), "<p>d</p>").unwrap();

        let pages = load_content(dir.path()).unwrap();
        let slugs: Vec<&str> = pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["alpha", "zeta"]);
    }

    #[test]
    fn test_load_content_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_content(dir.path().join("content")).is_err());
    }
}
