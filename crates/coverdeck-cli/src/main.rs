use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coverdeck_core::{AppConfig, DrawMode};

mod commands;

#[derive(Parser)]
#[command(name = "coverdeck")]
#[command(author, version, about = "A terminal coverflow card deck with flip-to-reveal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deck file to load (overrides general.deck_path)
    #[arg(short = 'd', long = "deck", global = true)]
    deck: Option<PathBuf>,

    /// Fixed shuffle seed (overrides general.seed)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Start in no-replacement mode
    #[arg(long, global = true)]
    no_replace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the carousel (default)
    Run,
    /// Check a deck file and summarize it
    Validate,
    /// Print one shuffled order of the deck
    Shuffle,
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(deck) = cli.deck {
        config.general.deck_path = deck;
    }
    if let Some(seed) = cli.seed {
        config.general.seed = Some(seed);
    }
    if cli.no_replace {
        config.draw.mode = DrawMode::NoReplace;
    }

    match cli.command {
        Some(Commands::Run) | None => {
            init_logging(&config, true)?;
            commands::run::run(config).await
        }
        Some(Commands::Validate) => {
            init_logging(&config, false)?;
            commands::validate::run(&config)
        }
        Some(Commands::Shuffle) => {
            init_logging(&config, false)?;
            commands::shuffle::run(&config)
        }
        Some(Commands::InitConfig { force }) => {
            init_logging(&config, false)?;
            commands::init_config::run(force)
        }
    }
}

/// The TUI owns the terminal, so it logs to a file; one-shot commands log
/// to stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
