use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the comfort analysis pipeline.
#[derive(Error, Debug)]
pub enum ComfortError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input CSV lacks one or more required columns.
    #[error("Missing required columns in CSV: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A CSV record could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

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

/// Convenience alias used throughout the comfort crates.
pub type Result<T> = std::result::Result<T, ComfortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ComfortError::FileRead {
            path: PathBuf::from("/some/input.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/input.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_columns_lists_all() {
        let err = ComfortError::MissingColumns(vec!["t_op".to_string(), "t_out".to_string()]);
        assert_eq!(
            err.to_string(),
            "Missing required columns in CSV: t_op, t_out"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = ComfortError::Config("output dir is not writable".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: output dir is not writable"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ComfortError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
