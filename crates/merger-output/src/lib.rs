//! Chunk output.
//!
//! A [`ChunkSink`] persists each completed [`Chunk`] as one tabular unit with
//! the canonical schema as its header. [`CsvChunkWriter`] writes
//! `master_file_{n}.csv` files; [`MemorySink`] keeps chunks in memory.

#![deny(unsafe_code)]

mod csv_writer;
mod error;
mod sink;

pub use csv_writer::{CsvChunkWriter, DEFAULT_FILE_PREFIX, write_chunk_csv};
pub use error::{OutputError, Result};
pub use sink::{ChunkSink, MemorySink, WrittenChunk};

pub use merger_model::{Chunk, Schema};
