//! Input listing for a run.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Enumerates the input files of a run.
///
/// The order returned is the order records are read in, so it decides
/// chunk numbering. Implementations must return a stable order.
pub trait InputCatalog {
    fn list_inputs(&self) -> Result<Vec<PathBuf>>;
}

/// Lists every regular file directly inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl InputCatalog for DirectoryCatalog {
    fn list_inputs(&self) -> Result<Vec<PathBuf>> {
        list_input_files(&self.dir)
    }
}

/// Lists all regular files in a directory, whatever their extension.
///
/// Returns files sorted by filename. Subdirectories are not descended into.
/// Unsupported formats are left for the reader to reject so they show up as
/// skipped files.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        files.push(path);
    }

    // Sort by filename
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["b_contacts.csv", "a_leads.xlsx", "c_notes.txt"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("archive")).unwrap();

        dir
    }

    #[test]
    fn test_list_input_files_sorted() {
        let dir = create_test_dir();
        let files = list_input_files(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a_leads.xlsx", "b_contacts.csv", "c_notes.txt"]);
    }

    #[test]
    fn test_list_input_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        let files = list_input_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_input_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_input_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_directory_catalog() {
        let dir = create_test_dir();
        let catalog = DirectoryCatalog::new(dir.path());
        assert_eq!(catalog.list_inputs().unwrap().len(), 3);
    }
}
