//! Settlement CSV discovery and loading.
//!
//! The only part of the pipeline that performs I/O. Acquisition failures
//! (missing paths, unreadable files, empty payloads) are hard errors;
//! everything past the read is handled by the fault-tolerant parser.

use std::path::{Path, PathBuf};

use settle_core::error::{Result, SettlementError};
use settle_core::models::SettlementRecord;
use tracing::{debug, warn};

use crate::parser::parse_settlement_csv;

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load and parse one settlement CSV file.
///
/// Errors on unreadable files and on files whose content is empty after
/// trimming; malformed rows inside a non-empty file are skipped by the
/// parser, never raised.
pub fn load_settlement_records(path: &Path) -> Result<Vec<SettlementRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| SettlementError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if text.trim().is_empty() {
        return Err(SettlementError::EmptyPayload(path.to_path_buf()));
    }

    let records = parse_settlement_csv(&text);
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load every `.csv` file under `dir` and concatenate the parsed records.
///
/// Errors when the directory is missing or contains no CSV files, and on
/// the first file that fails to load.
pub fn load_from_dir(dir: &Path) -> Result<Vec<SettlementRecord>> {
    if !dir.exists() {
        return Err(SettlementError::DataPathNotFound(dir.to_path_buf()));
    }

    let files = find_csv_files(dir);
    if files.is_empty() {
        return Err(SettlementError::NoDataFiles(dir.to_path_buf()));
    }

    let mut records = Vec::new();
    for file in &files {
        records.extend(load_settlement_records(file)?);
    }

    debug!(
        "Loaded {} records from {} files under {}",
        records.len(),
        files.len(),
        dir.display()
    );
    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
