//! The merge pipeline.
//!
//! A run has two strictly sequential phases:
//!
//! 1. **Discovery** - read every input once and collect the distinct raw
//!    field names ([`FieldCollector`]), then ask the [`MappingProvider`]
//!    for a canonical mapping exactly once.
//! 2. **Transform** - read every input again, normalize each row against
//!    the canonical schema and batch rows into fixed-size chunks
//!    ([`ChunkMerger`]) handed to a [`ChunkSink`].
//!
//! Per-file read failures are logged and the file is skipped; failures to
//! establish a schema or to write a chunk abort the run.
//!
//! [`MappingProvider`]: merger_map::MappingProvider
//! [`ChunkSink`]: merger_output::ChunkSink

#![deny(unsafe_code)]

pub mod collector;
pub mod error;
pub mod merger;
pub mod pipeline;
pub mod redact;
pub mod report;

pub use collector::{FieldCollector, collect_fields};
pub use error::{EmptySchemaReason, PipelineError, Result};
pub use merger::ChunkMerger;
pub use pipeline::{MergeConfig, MergePipeline};
pub use report::{Discovery, FileOutcome, FileStatus, RunReport, TransformReport};
