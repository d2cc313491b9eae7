//! The mapping collaborator seam.

use merger_model::FieldMapping;

use crate::error::Result;

/// Proposes a canonical [`FieldMapping`] for a set of raw field names.
///
/// The pipeline calls [`MappingProvider::propose`] exactly once per run and
/// waits for it; implementations own any timeout or retry policy.
pub trait MappingProvider {
    fn propose(&self, fields: &[String]) -> Result<FieldMapping>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Returns a fixed mapping regardless of the fields it is given.
#[derive(Debug, Clone, Default)]
pub struct StaticMappingProvider {
    mapping: FieldMapping,
}

impl StaticMappingProvider {
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }
}

impl MappingProvider for StaticMappingProvider {
    fn propose(&self, _fields: &[String]) -> Result<FieldMapping> {
        Ok(self.mapping.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

impl<P: MappingProvider + ?Sized> MappingProvider for Box<P> {
    fn propose(&self, fields: &[String]) -> Result<FieldMapping> {
        (**self).propose(fields)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
