//! ytl-finder - print the lyrics of the song in a YouTube video

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use ytl_finder::{FinderConfig, LyricsFinder, SourceKind};

/// Command-line arguments for ytl-finder
#[derive(Parser, Debug)]
#[command(name = "ytl-finder")]
#[command(about = "Find lyrics for the song in a YouTube video")]
#[command(version)]
struct Args {
    /// YouTube video link
    link: String,

    /// Config file (default: <config dir>/ytl/ytl-finder.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lyrics source to try, in order; repeat to list several
    #[arg(short, long = "source", value_name = "NAME")]
    sources: Vec<SourceKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let location = FinderConfig::locate(args.config.as_deref());
    let config = FinderConfig::load_from(&location)
        .context("Failed to load configuration")?
        .with_sources(args.sources)
        .context("Invalid --source list")?;

    ytl_common::logging::init(&config.logging.level).context("Failed to initialize logging")?;

    info!("Starting ytl-finder {}", env!("CARGO_PKG_VERSION"));
    match location.path() {
        Some(path) if path.exists() => info!("Configuration: {}", path.display()),
        Some(path) => info!("Configuration: built-in defaults (no file at {})", path.display()),
        None => info!("Configuration: built-in defaults"),
    }

    let finder = LyricsFinder::from_config(&config).context("Failed to initialize lyrics finder")?;
    info!(sources = ?finder.source_names(), "Lyrics sources in priority order");

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    match finder.find(&args.link, &cancel).await {
        Ok(report) => {
            info!(source = %report.source, provenance = %report.provenance, "Lyrics found");
            println!("{}", report);
            Ok(())
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "Lyrics lookup failed");
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}

/// Cancel the lookup on Ctrl+C
async fn cancel_on_signal(cancel: CancellationToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Interrupted, cancelling lookup");
            cancel.cancel();
        }
        Err(e) => warn!("Failed to install Ctrl+C handler: {}", e),
    }
}
