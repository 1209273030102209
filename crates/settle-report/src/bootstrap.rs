use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.settle-report/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.settle-report/`
/// - `~/.settle-report/logs/`
/// - `~/.settle-report/data/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let report_dir = home.join(".settle-report");
    std::fs::create_dir_all(&report_dir)?;
    std::fs::create_dir_all(report_dir.join("logs"))?;
    std::fs::create_dir_all(report_dir.join("data"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(log_level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Attempt to locate settlement data on the local system.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./monthly_settlement.csv`
/// 2. `./data/`
/// 3. `~/.settle-report/data/`
///
/// Returns `None` when none exists.
pub fn discover_data_path() -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("monthly_settlement.csv"),
        PathBuf::from("data"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".settle-report").join("data"));
    }
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
