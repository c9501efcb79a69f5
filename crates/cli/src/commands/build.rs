use super::{STATIC_DIR, load_site, resolve_variant};
use anyhow::{Context, Result};
use blog_kit_core::ArticleVariant;
use blog_kit_generator::generate_site;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Build static site for deployment
pub async fn run(
    path: PathBuf,
    output: PathBuf,
    variant_override: Option<ArticleVariant>,
) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let (site, pages) = load_site(&path)?;
    let variant = resolve_variant(&site, variant_override);

    println!("✓ Loaded: {}", site.config.info.title);
    println!("  Pages: {}", pages.len());
    println!("  Article: {:?}", variant);
    println!();

    fs::create_dir_all(&output).context("Failed to create output directory")?;

    println!("🎨 Copying static files...");
    let copied = copy_static(&path.join(STATIC_DIR), &output)?;
    println!("   ✓ Copied {} static files", copied);

    println!("📄 Rendering pages...");
    let generated = generate_site(&site, &pages, variant).context("Failed to render site")?;
    for (rel_path, html) in &generated.pages {
        write_output(&output, rel_path, html.as_bytes())?;
    }
    println!("   ✓ Rendered {} pages", generated.pages.len());

    for (rel_path, data) in &generated.assets {
        write_output(&output, rel_path, data)?;
        println!("   ✓ Generated {}", rel_path);
    }

    tracing::info!(
        pages = generated.pages.len(),
        output = %output.display(),
        "build complete"
    );

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

fn write_output(output: &Path, rel_path: &str, data: &[u8]) -> Result<()> {
    let dst = output.join(rel_path);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&dst, data).with_context(|| format!("Failed to write {}", dst.display()))
}

/// Copy `static/` into the output root, keeping the directory layout
fn copy_static(static_dir: &Path, output: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(static_dir)
            .context("Static file outside static directory")?;
        let dst = output.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dst)
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied += 1;
    }

    Ok(copied)
}
