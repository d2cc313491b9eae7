//! CSV master-file writer.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use merger_model::{Chunk, Schema};
use tracing::debug;

use crate::error::{OutputError, Result};
use crate::sink::{ChunkSink, WrittenChunk};

/// File names are `{prefix}_{sequence}.csv`.
pub const DEFAULT_FILE_PREFIX: &str = "master_file";

/// Encodes a chunk as CSV: schema header row, then one row per record.
///
/// Cells are quoted only when they need to be.
pub fn write_chunk_csv<W: Write>(output: W, chunk: &Chunk, schema: &Schema) -> Result<()> {
    let csv_err = |source| OutputError::Csv {
        sequence: chunk.sequence,
        source,
    };
    let mut writer = WriterBuilder::new().from_writer(output);
    writer.write_record(schema.fields()).map_err(csv_err)?;
    for record in &chunk.records {
        writer.write_record(record.values()).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| csv_err(e.into()))?;
    Ok(())
}

/// Writes each chunk to its own CSV file in an output directory.
///
/// Files are written under a temporary name and renamed into place, so a
/// rerun over the same directory replaces whole files.
#[derive(Debug, Clone)]
pub struct CsvChunkWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl CsvChunkWriter {
    /// Creates the writer, creating `output_dir` if needed.
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| OutputError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self {
            output_dir,
            prefix: DEFAULT_FILE_PREFIX.to_string(),
        })
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn chunk_path(&self, sequence: u64) -> PathBuf {
        self.output_dir
            .join(format!("{}_{sequence}.csv", self.prefix))
    }
}

impl ChunkSink for CsvChunkWriter {
    fn write_chunk(&mut self, chunk: &Chunk, schema: &Schema) -> Result<WrittenChunk> {
        let path = self.chunk_path(chunk.sequence);
        let temp_path = self
            .output_dir
            .join(format!(".{}_{}.csv.tmp", self.prefix, chunk.sequence));
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| OutputError::Io {
                sequence: chunk.sequence,
                path,
                source,
            }
        };

        let file = fs::File::create(&temp_path).map_err(io_err(&temp_path))?;
        let written = write_chunk_csv(std::io::BufWriter::new(file), chunk, schema)
            .and_then(|()| fs::rename(&temp_path, &path).map_err(io_err(&path)));
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                debug!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "could not remove temporary chunk file"
                );
            }
            return Err(err);
        }

        debug!(
            sequence = chunk.sequence,
            rows = chunk.len(),
            path = %path.display(),
            "chunk written"
        );
        Ok(WrittenChunk {
            sequence: chunk.sequence,
            rows: chunk.len(),
            location: Some(path),
        })
    }
}
