//! Size-bounded batching of normalized records.

use std::num::NonZeroUsize;

use merger_model::{Chunk, NormalizedRecord, Schema};
use merger_output::{ChunkSink, OutputError, WrittenChunk};

/// Folds normalized records into sequence-numbered chunks.
///
/// Every chunk handed to the sink holds exactly `chunk_size` records, except
/// the one emitted by [`ChunkMerger::flush_remaining`], which holds whatever
/// is left (never zero). Sequence numbers start at 1.
#[derive(Debug)]
pub struct ChunkMerger<S> {
    sink: S,
    schema: Schema,
    chunk_size: NonZeroUsize,
    buffer: Vec<NormalizedRecord>,
    next_sequence: u64,
    emitted: Vec<WrittenChunk>,
}

impl<S: ChunkSink> ChunkMerger<S> {
    pub fn new(sink: S, schema: Schema, chunk_size: NonZeroUsize) -> Self {
        Self {
            sink,
            schema,
            chunk_size,
            buffer: Vec::with_capacity(chunk_size.get()),
            next_sequence: 1,
            emitted: Vec::new(),
        }
    }

    /// Appends a record, emitting a chunk when the buffer reaches the chunk size.
    pub fn push(&mut self, record: NormalizedRecord) -> Result<Option<&WrittenChunk>, OutputError> {
        self.buffer.push(record);
        if self.buffer.len() == self.chunk_size.get() {
            return self.emit().map(Some);
        }
        Ok(None)
    }

    /// Emits the buffered records as a final chunk if there are any.
    pub fn flush_remaining(&mut self) -> Result<Option<&WrittenChunk>, OutputError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }
        self.emit().map(Some)
    }

    fn emit(&mut self) -> Result<&WrittenChunk, OutputError> {
        let records = std::mem::replace(
            &mut self.buffer,
            Vec::with_capacity(self.chunk_size.get()),
        );
        let chunk = Chunk::new(self.next_sequence, records);
        let written = self.sink.write_chunk(&chunk, &self.schema)?;
        self.next_sequence += 1;
        self.emitted.push(written);
        Ok(&self.emitted[self.emitted.len() - 1])
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Sequence number the next emitted chunk will carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn emitted(&self) -> &[WrittenChunk] {
        &self.emitted
    }

    /// Returns the sink and the chunks written so far.
    pub fn finish(self) -> (S, Vec<WrittenChunk>) {
        (self.sink, self.emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merger_model::FieldMapping;
    use merger_output::MemorySink;

    fn schema() -> Schema {
        let mapping: FieldMapping = [("Id", vec!["id"])].into_iter().collect();
        mapping.schema()
    }

    fn record(schema: &Schema, id: usize) -> NormalizedRecord {
        let mut record = NormalizedRecord::empty(schema);
        record.set("Id", id.to_string()).unwrap();
        record
    }

    fn ids(chunk: &Chunk) -> Vec<String> {
        chunk
            .records
            .iter()
            .map(|r| r.get("Id").unwrap().to_string())
            .collect()
    }

    fn merge(count: usize, chunk_size: usize) -> Vec<Chunk> {
        let schema = schema();
        let mut merger = ChunkMerger::new(
            MemorySink::new(),
            schema.clone(),
            NonZeroUsize::new(chunk_size).unwrap(),
        );
        for id in 1..=count {
            merger.push(record(&schema, id)).unwrap();
        }
        merger.flush_remaining().unwrap();
        merger.finish().0.into_chunks()
    }

    #[test]
    fn test_three_records_chunk_size_two() {
        let chunks = merge(3, 2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].sequence, 1);
        assert_eq!(ids(&chunks[0]), vec!["1", "2"]);
        assert_eq!(chunks[1].sequence, 2);
        assert_eq!(ids(&chunks[1]), vec!["3"]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_chunk() {
        let chunks = merge(4, 2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(ids(&chunks[1]), vec!["3", "4"]);
    }

    #[test]
    fn test_no_records_no_chunks() {
        assert!(merge(0, 5).is_empty());
    }

    #[test]
    fn test_push_reports_emission() {
        let schema = schema();
        let mut merger =
            ChunkMerger::new(MemorySink::new(), schema.clone(), NonZeroUsize::new(2).unwrap());

        assert!(merger.push(record(&schema, 1)).unwrap().is_none());
        let written = merger.push(record(&schema, 2)).unwrap().cloned();
        assert_eq!(written.map(|w| (w.sequence, w.rows)), Some((1, 2)));
        assert_eq!(merger.buffered(), 0);
        assert_eq!(merger.next_sequence(), 2);

        assert!(merger.flush_remaining().unwrap().is_none());
        assert!(merger.flush_remaining().unwrap().is_none());
        assert_eq!(merger.emitted().len(), 1);
    }
}
