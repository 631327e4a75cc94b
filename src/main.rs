mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaxassist::config::{Config, LoggingConfig};

#[derive(Parser)]
#[command(
    name = "vaxassist",
    version,
    about = "FAQ and statistics assistant for a COVID-19 vaccination dashboard",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite statistics database, overrides the configuration
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long, global = true)]
    metrics: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Reply language (en, hi, bn, ta, te, fr, ...)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Interactive conversation on stdin
    Chat {
        /// Reply language
        #[arg(short, long)]
        lang: Option<String>,

        /// Session id, random when omitted
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Show how a question is understood without answering it
    Explain {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List knowledge-base intents
    Intents,

    /// Load vaccination statistics from a JSON file into the database
    Load {
        /// JSON array of country statistics
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database.sqlite_path = db;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.validate()?;

    // Initialize tracing/logging
    setup_tracing(&config.logging, cli.verbose)?;
    vaxassist::i18n::init_from_env();

    if let Err(e) = vaxassist::metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics initialization failed");
    }

    tracing::info!("vaxassist starting");

    match cli.command {
        Commands::Ask { text, lang } => {
            commands::ask(&config, &text.join(" "), lang.as_deref()).await?;
        }
        Commands::Chat { lang, session } => {
            tracing::info!(lang = ?lang, session = ?session, "Starting chat");
            commands::chat(&config, lang.as_deref(), session).await?;
        }
        Commands::Explain { text } => {
            commands::explain(&config, &text.join(" "))?;
        }
        Commands::Intents => {
            commands::intents()?;
        }
        Commands::Load { file } => {
            tracing::info!(file = %file.display(), "Loading statistics");
            commands::load(&config, &file)?;
        }
    }

    if cli.metrics {
        dump_metrics();
    }

    Ok(())
}

fn dump_metrics() {
    match vaxassist::metrics::encode_metrics() {
        Ok(text) => eprint!("{text}"),
        Err(e) => tracing::warn!(error = %e, "Failed to encode metrics"),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    }
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("vaxassist=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(format!("vaxassist={},warn", logging.level))
        })
    };

    // Replies go to stdout; logs must not interleave with them
    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
