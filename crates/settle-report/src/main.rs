mod bootstrap;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use settle_core::models::Profession;
use settle_data::reader;
use settle_data::store::AggregateStore;

/// Monthly settlement reporting over vendor maintenance CSV data.
#[derive(Debug, Parser)]
#[command(name = "settle-report", version)]
struct Cli {
    /// Path to a settlement CSV file or a directory of CSV files.
    /// Defaults to the first discovered standard location.
    data_path: Option<PathBuf>,

    /// Month to report on, "YYYY-MM". Defaults to the latest month loaded.
    #[arg(long)]
    month: Option<String>,

    /// Profession selector: all, residential-broadband, enterprise-line,
    /// transport-line or wireless.
    #[arg(long, default_value = "all")]
    profession: String,

    /// Emit the report as pretty-printed JSON instead of a text table.
    #[arg(long)]
    json: bool,

    /// Log level directive (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "SETTLE_LOG")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&cli.log_level)?;

    tracing::info!("settle-report v{} starting", env!("CARGO_PKG_VERSION"));

    let data_path = cli
        .data_path
        .or_else(bootstrap::discover_data_path)
        .context("no data path given and no settlement data found in standard locations")?;

    let records = if data_path.is_dir() {
        reader::load_from_dir(&data_path)?
    } else {
        reader::load_settlement_records(&data_path)?
    };
    tracing::info!(
        "Loaded {} settlement records from {}",
        records.len(),
        data_path.display()
    );

    let store = AggregateStore::from_records(&records);

    let month_key = match cli.month {
        Some(month) => month,
        None => store
            .latest_month()
            .context("no monthly data present in the loaded files")?
            .to_string(),
    };

    let profession: Profession = cli
        .profession
        .parse()
        .map_err(anyhow::Error::msg)?;

    let report = report::build_monthly_report(&store, &month_key, profession)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_text(&report));
    }

    Ok(())
}
