//! Spreadsheet workbook record reading.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use merger_model::{RawRecord, RawValue};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads every sheet of a workbook, in workbook order, into raw records.
///
/// The first row of each sheet is its header. Columns with an empty header
/// are ignored, empty cells are left out of the record, and rows without any
/// value are skipped.
pub fn read_workbook_records(path: &Path) -> Result<Vec<RawRecord>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let workbook_err = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_err(e.to_string()))?;

    let mut records = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| workbook_err(format!("sheet '{sheet}': {e}")))?;
        let sheet_records = sheet_records(&range);
        debug!(
            path = %path.display(),
            sheet = %sheet,
            rows = sheet_records.len(),
            "read worksheet"
        );
        records.extend(sheet_records);
    }

    Ok(records)
}

/// Converts one worksheet range into records keyed by its first row.
fn sheet_records(range: &Range<Data>) -> Vec<RawRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            let name = cell.to_string();
            (!name.trim().is_empty()).then_some(name)
        })
        .collect();

    rows.filter_map(|row| {
        let mut record = RawRecord::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(row) {
            if let (Some(header), Some(value)) = (header, cell_value(cell)) {
                record.push(header.clone(), value);
            }
        }
        (!record.is_empty()).then_some(record)
    })
    .collect()
}

/// Converts a cell to a raw value; `None` for empty cells.
///
/// Dates keep their serial number form.
fn cell_value(cell: &Data) -> Option<RawValue> {
    match cell {
        Data::Empty => None,
        Data::String(text) if text.is_empty() => None,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            Some(RawValue::Text(text.clone()))
        }
        Data::Int(value) => Some(RawValue::Integer(*value)),
        Data::Float(value) => Some(RawValue::Float(*value)),
        Data::Bool(value) => Some(RawValue::Bool(*value)),
        Data::DateTime(value) => Some(RawValue::Float(value.as_f64())),
        Data::Error(error) => Some(RawValue::Text(error.to_string())),
    }
}
