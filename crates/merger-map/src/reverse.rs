//! Variant-to-canonical lookup derived from a [`FieldMapping`].

use std::collections::HashMap;

use merger_model::{FieldMapping, normalize_key};

/// Lookup from a normalized variant (trimmed, lower-cased) to its canonical
/// field name.
///
/// When two variants normalize to the same key, the one inserted last wins.
/// Insertion follows the mapping's field order, then each field's variant
/// order, so the outcome is deterministic for a given mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseMap {
    lookup: HashMap<String, String>,
}

impl ReverseMap {
    pub fn build(mapping: &FieldMapping) -> Self {
        let mut lookup = HashMap::new();
        for (canonical, variants) in mapping.iter() {
            for variant in variants {
                let key = normalize_key(variant);
                if let Some(previous) = lookup.insert(key, canonical.to_string())
                    && previous != canonical
                {
                    tracing::debug!(
                        variant = %variant,
                        previous = %previous,
                        canonical = %canonical,
                        "variant remapped to a later canonical field"
                    );
                }
            }
        }
        Self { lookup }
    }

    /// Resolves a raw field name. The name is normalized before lookup.
    pub fn resolve(&self, raw_key: &str) -> Option<&str> {
        self.lookup.get(&normalize_key(raw_key)).map(String::as_str)
    }

    /// Looks up an already-normalized key.
    pub fn get(&self, normalized_key: &str) -> Option<&str> {
        self.lookup.get(normalized_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}
