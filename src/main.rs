//! Binary entry point that glues the verse corpus and marker folder to the
//! TUI: resolve paths, start file logging (the terminal belongs to Ratatui),
//! and drive the event loop until the user exits.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use bible_memory::{run_app, App, Config, FileCorpus, FsMarkerDir, VerseLookupService};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config)?;

    let markers = FsMarkerDir::open(&config.marker_dir)?;
    let corpus = FileCorpus::new(&config.corpus_path);
    info!(
        corpus = %corpus.path().display(),
        markers = %config.marker_dir.display(),
        "starting"
    );

    let mut app = App::new(VerseLookupService::new(corpus, markers));
    run_app(&mut app)
}

/// Send `tracing` output to the log file, filtered by `RUST_LOG` (default
/// `info`).
fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
