mod commands;
mod server;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "press-kit")]
#[command(version, about = "Site server for a headless WordPress blog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Serve the site
    Serve {
        /// Path to press-kit.toml (defaults to ./press-kit.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to serve on (overrides [server].port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve content from a JSON fixture file instead of WordPress
        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Show what a slug resolves to, with its meta tags and JSON-LD
    Resolve {
        /// Slug to look up, e.g. "my-first-post"
        slug: String,

        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Validate configuration and fixture files
    Validate {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        fixtures: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "press_kit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            fixtures,
        } => commands::serve::run(config, port, fixtures).await,
        Command::Resolve {
            slug,
            config,
            fixtures,
        } => commands::resolve::run(slug, config, fixtures).await,
        Command::Validate { config, fixtures } => commands::validate::run(config, fixtures).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "press-kit", &mut io::stdout());
            Ok(())
        }
    }
}
