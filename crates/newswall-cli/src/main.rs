use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newswall_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "newswall")]
#[command(author, version, about = "A polled multi-outlet headline dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard TUI
    Run,
    /// List the configured outlet panels
    Outlets,
    /// Fetch one outlet's headlines and print them
    Fetch {
        /// Outlet label, e.g. "CNN" or "Fox Business"
        label: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Outlets) => commands::outlets::run(&config),
        Some(Commands::Fetch { label }) => commands::fetch::run(&config, &label).await,
    }
}
