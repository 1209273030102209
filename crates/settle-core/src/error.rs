use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the settlement engine.
///
/// Malformed row *content* never surfaces here; bad cells default to zero
/// and short rows are skipped. Only acquisition failures are hard errors.
#[derive(Error, Debug)]
pub enum SettlementError {
    /// A CSV file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV file was present but contained no content at all.
    #[error("Settlement file is empty: {0}")]
    EmptyPayload(PathBuf),

    /// The expected data directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the settlement crates.
pub type Result<T> = std::result::Result<T, SettlementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = SettlementError::FileRead {
            path: PathBuf::from("/some/settlement.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/settlement.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_empty_payload() {
        let err = SettlementError::EmptyPayload(PathBuf::from("/data/empty.csv"));
        assert_eq!(err.to_string(), "Settlement file is empty: /data/empty.csv");
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = SettlementError::DataPathNotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Data path not found: /missing/dir");
    }

    #[test]
    fn test_error_display_no_data_files() {
        let err = SettlementError::NoDataFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No CSV files found in /empty/dir");
    }

    #[test]
    fn test_error_display_config() {
        let err = SettlementError::Config("unknown profession".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown profession");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SettlementError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
