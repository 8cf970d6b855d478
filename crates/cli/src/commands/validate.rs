use anyhow::{Context, Result};
use press_kit_client::Fixture;
use std::path::PathBuf;

/// Check configuration (and optionally a fixture file) without serving
pub async fn run(config: Option<PathBuf>, fixtures: Option<PathBuf>) -> Result<()> {
    let config = super::load(config)?;

    println!("✓ Configuration valid");
    println!("  Site:       {} ({})", config.site.name, config.site.url);
    println!("  CMS:        {}", config.wordpress.rest_base());
    println!("  Cache TTL:  {}s", config.wordpress.cache_ttl.as_secs());
    println!("  Menu:       {}", config.wordpress.menu_location);
    if config.smtp.host.is_empty() {
        println!("  Mail:       log only (no SMTP host)");
    } else {
        println!(
            "  Mail:       {}:{} → {}",
            config.smtp.host, config.smtp.port, config.smtp.recipient
        );
    }
    println!("  Newsletter: {}", config.newsletter.accepted_domains.join(", "));
    println!("  Listen:     {}:{}", config.server.bind, config.server.port);

    if let Some(path) = fixtures {
        let fixture = Fixture::from_file(&path)
            .with_context(|| format!("Invalid fixture file {}", path.display()))?;
        println!("\n✓ Fixtures valid: {}", path.display());
        println!(
            "  {} posts, {} pages, {} categories, {} tags, {} authors, {} comments",
            fixture.posts.len(),
            fixture.pages.len(),
            fixture.categories.len(),
            fixture.tags.len(),
            fixture.authors.len(),
            fixture.comments.len()
        );
    }

    Ok(())
}
