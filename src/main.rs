mod budget;
mod config;
mod export;
mod format;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::sync::Mutex;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let settings = config::Settings::from_env();

    // Logging is best-effort; a broken log file never blocks a session.
    if let Err(e) = init_logging(&settings) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    match args.len() {
        0 | 1 => run::as_tui(settings),
        _ => run::as_cli(&args, &settings),
    }
}

/// Log to a file in the data directory; stdout belongs to the TUI.
fn init_logging(settings: &config::Settings) -> Result<()> {
    let Some(path) = settings.log_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("Invalid log filter: {}", settings.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
