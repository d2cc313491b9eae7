//! Integration tests for listing and reading a mixed input directory.

use merger_ingest::{
    DirectoryCatalog, FileRecordReader, IngestError, InputCatalog, RawRecord, RecordReader,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn reads_supported_files_and_rejects_others() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.csv", "Email,Phone\nb@x.com,2\n");
    write(&dir, "a.CSV", "Full Name\nAda\nAlan\n");
    write(&dir, "readme.md", "# notes");

    let catalog = DirectoryCatalog::new(dir.path());
    let reader = FileRecordReader;

    let mut read: Vec<Vec<RawRecord>> = Vec::new();
    let mut skipped = Vec::new();
    for path in catalog.list_inputs().unwrap() {
        match reader.read_records(&path) {
            Ok(records) => read.push(records),
            Err(err) => {
                assert!(err.is_per_file());
                skipped.push(err);
            }
        }
    }

    assert_eq!(read.len(), 2);
    // a.CSV sorts before b.csv
    assert_eq!(read[0].len(), 2);
    assert_eq!(read[1][0].keys().collect::<Vec<_>>(), vec!["Email", "Phone"]);
    assert_eq!(skipped.len(), 1);
    assert!(matches!(skipped[0], IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_directory_is_not_per_file() {
    let dir = TempDir::new().unwrap();
    let catalog = DirectoryCatalog::new(dir.path().join("absent"));
    let err = catalog.list_inputs().unwrap_err();
    assert!(!err.is_per_file());
}
