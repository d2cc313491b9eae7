//! Mapping persistence and the file-backed provider.

use std::fs;
use std::path::{Path, PathBuf};

use merger_model::FieldMapping;
use tracing::{debug, info};

use crate::error::{MappingError, Result};
use crate::payload::parse_mapping_payload;
use crate::provider::MappingProvider;
use crate::reverse::ReverseMap;

/// Writes a mapping payload verbatim, creating parent directories.
///
/// The text is stored as the provider returned it, so a payload that later
/// fails to parse can still be inspected.
pub fn save_mapping_payload(path: &Path, payload: &str) -> Result<()> {
    let write_err = |source| MappingError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, payload).map_err(write_err)?;
    Ok(())
}

/// Reads a mapping file written by [`save_mapping_payload`] or by hand.
pub fn load_mapping(path: &Path) -> Result<FieldMapping> {
    let content = fs::read_to_string(path).map_err(|source| MappingError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_mapping_payload(&content)
}

/// Serves the mapping saved in a file instead of asking a remote service.
#[derive(Debug, Clone)]
pub struct FileMappingProvider {
    path: PathBuf,
}

impl FileMappingProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MappingProvider for FileMappingProvider {
    fn propose(&self, fields: &[String]) -> Result<FieldMapping> {
        let mapping = load_mapping(&self.path)?;
        info!(
            path = %self.path.display(),
            canonical_fields = mapping.len(),
            "loaded saved field mapping"
        );

        let reverse = ReverseMap::build(&mapping);
        let uncovered: Vec<&str> = fields
            .iter()
            .map(String::as_str)
            .filter(|field| reverse.resolve(field).is_none())
            .collect();
        if !uncovered.is_empty() {
            debug!(
                count = uncovered.len(),
                fields = ?uncovered,
                "saved mapping does not cover every raw field"
            );
        }
        Ok(mapping)
    }

    fn name(&self) -> &str {
        "mapping-file"
    }
}
