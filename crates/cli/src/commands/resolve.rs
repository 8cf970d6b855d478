use anyhow::{Context, Result};
use press_kit_client::{ResolveOptions, load_view, resolve};
use press_kit_generator::{build_meta, schema_for};
use std::path::PathBuf;

/// Resolve a slug the way the server does and print what the page would carry
pub async fn run(slug: String, config: Option<PathBuf>, fixtures: Option<PathBuf>) -> Result<()> {
    let config = super::load(config)?;
    let source = super::content_source(&config, fixtures.as_deref())?;

    let options = ResolveOptions {
        include_tags: config.wordpress.resolve_tags,
    };
    let resolved = resolve(source.as_ref(), &slug, options).await;
    println!("🔎 {} → {}", slug, resolved.kind());
    if !resolved.is_found() {
        println!("   Nothing matches this slug; the server answers 404.");
        return Ok(());
    }

    let view = load_view(source.as_ref(), resolved).await;
    let meta = build_meta(&config.site, &view);
    let schema = schema_for(&config.site, &view);

    println!("\nMeta:");
    println!(
        "{}",
        serde_json::to_string_pretty(&meta).context("Failed to encode meta")?
    );
    for block in &schema {
        println!("\nJSON-LD:");
        println!(
            "{}",
            serde_json::to_string_pretty(block).context("Failed to encode schema")?
        );
    }
    Ok(())
}
