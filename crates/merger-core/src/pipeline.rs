//! Two-phase merge pipeline.
//!
//! # Example
//!
//! ```ignore
//! use merger_core::{MergeConfig, MergePipeline};
//! use merger_ingest::{DirectoryCatalog, FileRecordReader};
//! use merger_output::CsvChunkWriter;
//!
//! let pipeline = MergePipeline::new(
//!     MergeConfig::new(chunk_size),
//!     Box::new(DirectoryCatalog::new("in")),
//!     Box::new(FileRecordReader),
//!     Box::new(provider),
//! );
//! let report = pipeline.run(CsvChunkWriter::create("out")?)?;
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use merger_ingest::{InputCatalog, RecordReader};
use merger_map::{FieldMapping, MappingProvider, ReverseMap};
use merger_model::RawRecord;
use merger_output::ChunkSink;
use merger_transform::RowNormalizer;
use tracing::{Level, debug, debug_span, info, info_span, trace, warn};

use crate::collector::FieldCollector;
use crate::error::{EmptySchemaReason, PipelineError, Result};
use crate::merger::ChunkMerger;
use crate::redact::redact_row;
use crate::report::{Discovery, FileOutcome, FileStatus, RunReport, TransformReport};

/// Settings of one merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Records per output chunk.
    pub chunk_size: NonZeroUsize,
}

impl MergeConfig {
    pub fn new(chunk_size: NonZeroUsize) -> Self {
        Self { chunk_size }
    }
}

/// Runs discovery, schema establishment and transform over a set of inputs.
///
/// Inputs are listed and read one at a time in catalog order, once per
/// phase. The mapping provider is called once and the transform phase does
/// not start until it has answered.
pub struct MergePipeline {
    config: MergeConfig,
    catalog: Box<dyn InputCatalog>,
    reader: Box<dyn RecordReader>,
    provider: Box<dyn MappingProvider>,
}

impl MergePipeline {
    pub fn new(
        config: MergeConfig,
        catalog: Box<dyn InputCatalog>,
        reader: Box<dyn RecordReader>,
        provider: Box<dyn MappingProvider>,
    ) -> Self {
        Self {
            config,
            catalog,
            reader,
            provider,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Runs both phases, writing every chunk to `sink`.
    ///
    /// On a fatal error the run stops; chunks already written stay written.
    pub fn run<S: ChunkSink>(&self, sink: S) -> Result<RunReport> {
        let run_span = info_span!("run", chunk_size = self.config.chunk_size.get());
        let _run_guard = run_span.enter();
        let run_start = Instant::now();

        let discovery = self.discover()?;
        let mapping = self.establish_schema(&discovery.fields)?;
        let unmapped_fields = unmapped_fields(&discovery.fields, &mapping);
        if !unmapped_fields.is_empty() {
            warn!(
                count = unmapped_fields.len(),
                fields = ?unmapped_fields,
                "raw fields not covered by the mapping will be dropped"
            );
        }
        let transform = self.transform(&mapping, sink)?;

        info!(
            records = transform.records,
            chunks = transform.chunks.len(),
            duration_ms = run_start.elapsed().as_millis(),
            "run complete"
        );
        Ok(RunReport {
            discovery,
            mapping,
            unmapped_fields,
            transform,
        })
    }

    /// Discovery phase: reads every input and collects raw field names.
    ///
    /// Fails with [`PipelineError::EmptySchema`] when no field name is found.
    pub fn discover(&self) -> Result<Discovery> {
        info_span!("discovery").in_scope(|| {
            let inputs = self.list_inputs()?;
            info!(files = inputs.len(), "scanning inputs for field names");

            let mut collector = FieldCollector::new();
            let mut files = Vec::with_capacity(inputs.len());
            for path in inputs {
                let status = match self.read_input(&path) {
                    Ok(records) => {
                        collector.observe_all(&records);
                        FileStatus::Read {
                            records: records.len(),
                        }
                    }
                    Err(err) => skipped(&err),
                };
                files.push(FileOutcome { path, status });
            }

            if collector.is_empty() {
                return Err(PipelineError::EmptySchema(EmptySchemaReason::NoRawFields));
            }
            info!(fields = collector.len(), "collected distinct raw field names");
            Ok(Discovery {
                files,
                fields: collector.into_fields(),
            })
        })
    }

    /// Asks the mapping provider for the canonical schema.
    pub fn establish_schema(&self, fields: &[String]) -> Result<FieldMapping> {
        if fields.is_empty() {
            return Err(PipelineError::EmptySchema(EmptySchemaReason::NoRawFields));
        }
        info!(
            provider = self.provider.name(),
            fields = fields.len(),
            "establishing field mapping"
        );
        let mapping = self.provider.propose(fields)?;
        if mapping.is_empty() {
            return Err(PipelineError::EmptySchema(EmptySchemaReason::EmptyMapping));
        }
        info!(
            canonical_fields = mapping.len(),
            "field mapping established"
        );
        Ok(mapping)
    }

    /// Transform phase: normalizes every row and writes size-bounded chunks.
    pub fn transform<S: ChunkSink>(
        &self,
        mapping: &FieldMapping,
        sink: S,
    ) -> Result<TransformReport> {
        if mapping.is_empty() {
            return Err(PipelineError::EmptySchema(EmptySchemaReason::EmptyMapping));
        }
        let transform_span = info_span!("transform");
        let _transform_guard = transform_span.enter();

        let normalizer = RowNormalizer::from_mapping(mapping);
        let mut merger = ChunkMerger::new(
            sink,
            normalizer.schema().clone(),
            self.config.chunk_size,
        );

        let inputs = self.list_inputs()?;
        info!(files = inputs.len(), "normalizing inputs");

        let mut files = Vec::with_capacity(inputs.len());
        let mut total_records = 0usize;
        for path in inputs {
            let file_span = debug_span!("file", path = %path.display());
            let _file_guard = file_span.enter();

            let rows = match self.read_input(&path) {
                Ok(rows) => rows,
                Err(err) => {
                    files.push(FileOutcome {
                        status: skipped(&err),
                        path,
                    });
                    continue;
                }
            };

            for (index, row) in rows.iter().enumerate() {
                let record = normalizer.normalize(row);
                if tracing::enabled!(Level::TRACE) {
                    trace!(row = index, values = %redact_row(record.iter()), "normalized row");
                }
                if let Some(written) = merger.push(record)? {
                    debug!(sequence = written.sequence, rows = written.rows, "chunk emitted");
                }
            }
            total_records += rows.len();
            debug!(records = rows.len(), "input normalized");
            files.push(FileOutcome {
                path,
                status: FileStatus::Read {
                    records: rows.len(),
                },
            });
        }

        if let Some(written) = merger.flush_remaining()? {
            debug!(sequence = written.sequence, rows = written.rows, "final chunk emitted");
        }
        let (_, chunks) = merger.finish();

        info!(
            records = total_records,
            chunks = chunks.len(),
            "transform complete"
        );
        Ok(TransformReport {
            files,
            records: total_records,
            chunks,
        })
    }

    fn list_inputs(&self) -> Result<Vec<PathBuf>> {
        self.catalog
            .list_inputs()
            .map_err(PipelineError::InputDirectory)
    }

    fn read_input(&self, path: &Path) -> Result<Vec<RawRecord>> {
        match self.reader.read_records(path) {
            Ok(records) => {
                debug!(path = %path.display(), records = records.len(), "input read");
                Ok(records)
            }
            Err(source) => {
                let err = PipelineError::from_read(path.to_path_buf(), source);
                warn!(error = %err, "skipping input");
                Err(err)
            }
        }
    }
}

fn skipped(err: &PipelineError) -> FileStatus {
    FileStatus::Skipped {
        reason: err.to_string(),
    }
}

/// Raw fields no variant of `mapping` resolves.
fn unmapped_fields(fields: &[String], mapping: &FieldMapping) -> Vec<String> {
    let reverse = ReverseMap::build(mapping);
    fields
        .iter()
        .filter(|field| reverse.resolve(field).is_none())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_fields() {
        let mapping: FieldMapping = [("Name", vec!["full name"])].into_iter().collect();
        let fields = vec!["Full Name ".to_string(), "Fax".to_string()];
        assert_eq!(unmapped_fields(&fields, &mapping), vec!["Fax"]);
    }
}
