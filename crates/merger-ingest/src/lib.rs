//! Input ingestion for the master merger.
//!
//! This crate finds the input files of a run and reads each one into an
//! ordered list of [`RawRecord`]s, whatever its tabular format.
//!
//! # Features
//!
//! - **Input listing**: regular files of a directory in file-name order
//! - **CSV**: header row plus data rows, ragged rows tolerated
//! - **Workbooks**: `.xlsx`, `.xlsm` and `.xls`, every sheet in workbook order
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use merger_ingest::{DirectoryCatalog, FileRecordReader, InputCatalog, RecordReader};
//!
//! let catalog = DirectoryCatalog::new("data/in");
//! for path in catalog.list_inputs()? {
//!     let records = FileRecordReader.read_records(&path)?;
//! }
//! ```

#![deny(unsafe_code)]

mod csv_reader;
mod discovery;
mod error;
mod format;
mod reader;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Input Listing ===
pub use discovery::{DirectoryCatalog, InputCatalog, list_input_files};

// === Record Reading ===
pub use csv_reader::read_csv_records;
pub use format::InputFormat;
pub use reader::{FileRecordReader, RecordReader};
pub use workbook::read_workbook_records;

pub use merger_model::RawRecord;
