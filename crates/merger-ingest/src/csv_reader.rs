//! CSV record reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use merger_model::{RawRecord, RawValue};

use crate::error::{IngestError, Result};

/// Reads a CSV file with a header row into raw records.
///
/// Header names are kept exactly as written apart from a leading UTF-8 BOM.
/// Cells are decoded lossily, so invalid UTF-8 never aborts the file. A row
/// shorter than the header omits the missing keys; cells beyond the header
/// are ignored.
pub fn read_csv_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_csv_from(file, path)
}

fn read_csv_from<R: Read>(input: R, path: &Path) -> Result<Vec<RawRecord>> {
    let parse_err = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(parse_err)?
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let header = String::from_utf8_lossy(raw);
            if idx == 0 {
                header.strip_prefix('\u{feff}').unwrap_or(&*header).to_string()
            } else {
                header.into_owned()
            }
        })
        .collect();

    let mut records = Vec::new();
    let mut row = ByteRecord::new();
    while reader.read_byte_record(&mut row).map_err(parse_err)? {
        let mut record = RawRecord::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(row.iter()) {
            record.push(
                header.clone(),
                RawValue::Text(String::from_utf8_lossy(cell).into_owned()),
            );
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_reads_rows_in_order() {
        let file = create_temp_csv(b"Full Name,Email\nAda,ada@x.com\nAlan,alan@x.com\n");
        let records = read_csv_records(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["Full Name", "Email"]);
        assert_eq!(records[1].get("Email"), Some(&RawValue::from("alan@x.com")));
    }

    #[test]
    fn test_headers_keep_raw_spacing() {
        let file = create_temp_csv(b" Name ,EMAIL\nAda,a@x.com\n");
        let records = read_csv_records(file.path()).unwrap();
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec![" Name ", "EMAIL"]);
    }

    #[test]
    fn test_strips_bom() {
        let file = create_temp_csv("\u{feff}Name\nAda\n".as_bytes());
        let records = read_csv_records(file.path()).unwrap();
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["Name"]);
    }

    #[test]
    fn test_ragged_rows() {
        let file = create_temp_csv(b"A,B,C\n1\n1,2,3,4\n");
        let records = read_csv_records(file.path()).unwrap();
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn test_quoted_cells() {
        let file = create_temp_csv(b"Name,Note\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n");
        let records = read_csv_records(file.path()).unwrap();
        assert_eq!(records[0].get("Name"), Some(&RawValue::from("Doe, Jane")));
        assert_eq!(records[0].get("Note"), Some(&RawValue::from("said \"hi\"")));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let file = create_temp_csv(b"Name\nJos\xe9\n");
        let records = read_csv_records(file.path()).unwrap();
        assert_eq!(records[0].get("Name"), Some(&RawValue::from("Jos\u{fffd}")));
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let file = create_temp_csv(b"");
        assert!(read_csv_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_records(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
