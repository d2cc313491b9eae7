//! Error taxonomy of a merge run.

use std::fmt;
use std::path::PathBuf;

use merger_ingest::IngestError;
use merger_map::MappingError;
use merger_output::OutputError;
use thiserror::Error;

/// Why no canonical schema could be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySchemaReason {
    /// Discovery found no raw field names at all.
    NoRawFields,
    /// The mapping provider returned an empty mapping.
    EmptyMapping,
}

impl fmt::Display for EmptySchemaReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRawFields => f.write_str("no raw field names found in any input"),
            Self::EmptyMapping => f.write_str("the mapping provider returned an empty mapping"),
        }
    }
}

/// Errors of a merge run.
///
/// `UnsupportedFormat` and `FileRead` are scoped to one input and are
/// recovered by skipping it; everything else aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input listing itself failed.
    #[error("cannot list inputs: {0}")]
    InputDirectory(#[source] IngestError),

    /// An input file has a format no reader handles.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// An input file could not be read or parsed.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    /// The mapping provider could not be reached or refused the request.
    #[error("mapping service failed: {0}")]
    MappingService(#[source] MappingError),

    /// The mapping provider answered with something that is not a mapping.
    #[error("mapping response is not a valid field mapping: {0}")]
    MappingParse(#[source] MappingError),

    /// No canonical schema could be derived.
    #[error("no schema could be derived: {0}")]
    EmptySchema(EmptySchemaReason),

    /// A chunk could not be persisted.
    #[error("chunk output failed: {0}")]
    Write(#[source] OutputError),
}

impl PipelineError {
    /// Classifies a per-input reader error.
    pub fn from_read(path: PathBuf, source: IngestError) -> Self {
        if source.is_unsupported_format() {
            Self::UnsupportedFormat { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    /// True when the run cannot continue.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::FileRead { .. }
        )
    }
}

impl From<MappingError> for PipelineError {
    fn from(err: MappingError) -> Self {
        if err.is_parse_error() {
            Self::MappingParse(err)
        } else {
            Self::MappingService(err)
        }
    }
}

impl From<OutputError> for PipelineError {
    fn from(err: OutputError) -> Self {
        Self::Write(err)
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
