//! Error types for input ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while listing or reading inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Directory Errors ===
    /// Input directory not found or not a directory.
    #[error("input directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Per-File Errors ===
    /// The file extension is not a supported tabular format.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },
}

impl IngestError {
    /// True for errors scoped to a single input file.
    ///
    /// The caller may skip that file and keep going.
    pub fn is_per_file(&self) -> bool {
        !matches!(
            self,
            Self::DirectoryNotFound { .. } | Self::DirectoryRead { .. }
        )
    }

    /// True when the file was rejected because of its format.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("/in/notes.txt"),
        };
        assert_eq!(err.to_string(), "unsupported file format: /in/notes.txt");
    }

    #[test]
    fn test_per_file_classification() {
        assert!(
            IngestError::Workbook {
                path: PathBuf::from("a.xlsx"),
                message: "corrupt".to_string(),
            }
            .is_per_file()
        );
        assert!(
            !IngestError::DirectoryNotFound {
                path: PathBuf::from("/missing"),
            }
            .is_per_file()
        );
    }
}
