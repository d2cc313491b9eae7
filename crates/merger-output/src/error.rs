use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting a chunk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write chunk {sequence} to {path}: {source}")]
    Io {
        sequence: u64,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode chunk {sequence} as CSV: {source}")]
    Csv {
        sequence: u64,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutputError::Io {
            sequence: 3,
            path: PathBuf::from("out/master_file_3.csv"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write chunk 3 to out/master_file_3.csv: disk full"
        );
    }
}
