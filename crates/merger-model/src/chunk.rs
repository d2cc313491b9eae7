use crate::record::NormalizedRecord;

/// A bounded, sequence-numbered batch of normalized records.
///
/// Sequence numbers start at 1 and increase by one per emitted chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub sequence: u64,
    pub records: Vec<NormalizedRecord>,
}

impl Chunk {
    pub fn new(sequence: u64, records: Vec<NormalizedRecord>) -> Self {
        Self { sequence, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
