mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use portal_config::{Config, PreferenceStore};
use portal_core::{ContentItem, Ticket, User};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing on stderr; silent by default while the TUI owns the screen
    let default_filter = match cli.command {
        cli::Commands::Ui { .. } => "off",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .with_env_overrides()?;
    if let Some(mode) = cli.source {
        config.source.mode = mode;
    }

    let mut prefs = PreferenceStore::open_default()?;
    let session = commands::Session::new(config);

    match cli.command {
        cli::Commands::Tickets(cmd) => {
            commands::records::handle::<Ticket>(cmd, &session, &prefs).await?
        }
        cli::Commands::Contents(cmd) => {
            commands::records::handle::<ContentItem>(cmd, &session, &prefs).await?
        }
        cli::Commands::Users(cmd) => {
            commands::records::handle::<User>(cmd, &session, &prefs).await?
        }
        cli::Commands::Prefs(cmd) => commands::prefs::handle(cmd, &mut prefs)?,
        cli::Commands::Ui { view } => return commands::ui::handle(view, &session, prefs).await,
    }

    prefs.close()
}
