use super::load_site;
use blog_kit_validator::validate_site;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let (site, pages) = load_site(&path)?;

    println!("✓ site.toml valid");
    println!("  Site: {} by {}", site.config.info.title, site.config.author.name);
    println!("  Pages: {}", pages.len());

    let report = validate_site(&path, &site, &pages);

    for info in &report.info {
        println!("  ℹ {}", info);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("  ✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✓ Site is valid");
    Ok(())
}
