use std::path::PathBuf;

use merger_model::{Chunk, Schema};

use crate::error::Result;

/// Where a chunk ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenChunk {
    pub sequence: u64,
    pub rows: usize,
    /// File path for file-backed sinks.
    pub location: Option<PathBuf>,
}

/// Persists completed chunks.
///
/// Called once per chunk, in sequence order. Failures are not retried.
pub trait ChunkSink {
    fn write_chunk(&mut self, chunk: &Chunk, schema: &Schema) -> Result<WrittenChunk>;
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn write_chunk(&mut self, chunk: &Chunk, schema: &Schema) -> Result<WrittenChunk> {
        (**self).write_chunk(chunk, schema)
    }
}

/// Keeps every chunk it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    chunks: Vec<Chunk>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

impl ChunkSink for MemorySink {
    fn write_chunk(&mut self, chunk: &Chunk, _schema: &Schema) -> Result<WrittenChunk> {
        self.chunks.push(chunk.clone());
        Ok(WrittenChunk {
            sequence: chunk.sequence,
            rows: chunk.len(),
            location: None,
        })
    }
}
