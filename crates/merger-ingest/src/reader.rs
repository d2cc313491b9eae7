//! Format-dispatching record reader.

use std::path::Path;

use merger_model::RawRecord;

use crate::csv_reader::read_csv_records;
use crate::error::{IngestError, Result};
use crate::format::InputFormat;
use crate::workbook::read_workbook_records;

/// Reads one input into its raw records, in source order.
///
/// Formats the implementation cannot handle must be reported as
/// [`IngestError::UnsupportedFormat`] so callers can skip the input.
pub trait RecordReader {
    fn read_records(&self, input: &Path) -> Result<Vec<RawRecord>>;
}

/// Reads CSV and workbook files, choosing the parser by extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRecordReader;

impl RecordReader for FileRecordReader {
    fn read_records(&self, input: &Path) -> Result<Vec<RawRecord>> {
        match InputFormat::from_path(input) {
            Some(InputFormat::Csv) => read_csv_records(input),
            Some(InputFormat::Workbook) => read_workbook_records(input),
            None => Err(IngestError::UnsupportedFormat {
                path: input.to_path_buf(),
            }),
        }
    }
}
