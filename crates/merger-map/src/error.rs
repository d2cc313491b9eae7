//! Error types for mapping discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while obtaining or persisting a field mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("mapping service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("mapping service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The service responded, but not with a usable completion.
    #[error("mapping service response is malformed: {reason}")]
    MalformedResponse { reason: String },

    /// The completion text is not a canonical-field-to-variants object.
    #[error("mapping payload is not a valid field mapping: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// A mapping file could not be read.
    #[error("failed to read mapping file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapping file could not be written.
    #[error("failed to write mapping file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MappingError {
    /// True when the collaborator answered but the payload was unusable.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::MalformedResponse { .. })
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
