//! Summaries produced by each phase of a run.

use std::path::PathBuf;

use merger_map::FieldMapping;
use merger_output::WrittenChunk;

/// What happened to one input during a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Read { records: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, FileStatus::Skipped { .. })
    }
}

/// Result of the discovery phase.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub files: Vec<FileOutcome>,
    /// Distinct raw field names, in first-seen order.
    pub fields: Vec<String>,
}

impl Discovery {
    pub fn files_read(&self) -> usize {
        self.files.iter().filter(|f| !f.is_skipped()).count()
    }

    pub fn files_skipped(&self) -> usize {
        self.files.iter().filter(|f| f.is_skipped()).count()
    }
}

/// Result of the transform phase.
#[derive(Debug, Clone, Default)]
pub struct TransformReport {
    pub files: Vec<FileOutcome>,
    pub records: usize,
    pub chunks: Vec<WrittenChunk>,
}

/// Everything a completed run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub discovery: Discovery,
    pub mapping: FieldMapping,
    /// Raw fields that no variant of the mapping covers.
    pub unmapped_fields: Vec<String>,
    pub transform: TransformReport,
}

impl RunReport {
    pub fn schema(&self) -> Vec<&str> {
        self.mapping.canonical_fields().collect()
    }
}
