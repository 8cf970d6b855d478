use crate::server::{AppState, build_router};
use anyhow::{Context, Result};
use press_kit_client::SmtpMailer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Start the site server.
///
/// Content comes from the CMS configured in `[wordpress]`, or from a JSON
/// fixture file when `fixtures` is given (local preview without a CMS).
pub async fn run(
    config: Option<PathBuf>,
    port: Option<u16>,
    fixtures: Option<PathBuf>,
) -> Result<()> {
    let mut config = super::load(config)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("🌱 Starting {}...", config.site.name);
    let source = super::content_source(&config, fixtures.as_deref())?;
    match &fixtures {
        Some(path) => println!("   ✓ Content: fixtures from {}", path.display()),
        None => println!("   ✓ Content: {}", config.wordpress.url),
    }

    let mailer = SmtpMailer::new(&config.smtp).context("Failed to configure mail")?;
    if mailer.is_enabled() {
        println!("   ✓ Mail: {}:{}", config.smtp.host, config.smtp.port);
    } else {
        println!("   ⚠ Mail: no SMTP host, messages will only be logged");
    }

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let state = AppState {
        source,
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Serving at: http://{}", addr);
    println!("   Press Ctrl+C to stop\n");
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no handler could be installed; run until killed
        std::future::pending::<()>().await;
    }
}
