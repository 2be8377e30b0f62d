use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Mutex, Once};

static TRACING_INIT: Once = Once::new();

fn filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("budgetgrid=info"))
}

/// Log to `path`, appending. The terminal stays untouched, so this is safe
/// to call before entering the TUI.
pub(crate) fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    TRACING_INIT.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        if installed.is_ok() {
            tracing::info!(path = %path.display(), "logging to file");
        }
    });
    Ok(())
}

/// Log to stderr, for the non-interactive commands.
pub(crate) fn init_stderr() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .try_init();
    });
}
