use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagesnap_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "pagesnap")]
#[command(author, version, about = "Scroll-snapping demo for a paged document")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI demo
    Run,
    /// Print the effective configuration as TOML
    Config {
        /// Write the configuration file instead of printing it
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Config { write }) => commands::config::run(&config, write),
    }
}
