//! Canonical field mapping as proposed by the mapping collaborator.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::Schema;

/// Normalizes a raw field name or variant for lookup: trim, then lower-case.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Canonical field name to the ordered list of raw variants it subsumes.
///
/// Entries keep insertion order, which is also the order of the canonical
/// schema and the iteration order used when building the reverse map.
/// Inserting an existing canonical name replaces its variants in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the variants for `canonical`.
    ///
    /// Returns the previous variants when the field already existed. The
    /// field keeps its original position.
    pub fn insert(
        &mut self,
        canonical: impl Into<String>,
        variants: Vec<String>,
    ) -> Option<Vec<String>> {
        let canonical = canonical.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(name, _)| *name == canonical)
        {
            return Some(std::mem::replace(existing, variants));
        }
        self.entries.push((canonical, variants));
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn variants(&self, canonical: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == canonical)
            .map(|(_, variants)| variants.as_slice())
    }

    /// Iterates `(canonical, variants)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, variants)| (name.as_str(), variants.as_slice()))
    }

    pub fn canonical_fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// The canonical schema: field names in insertion order.
    pub fn schema(&self) -> Schema {
        Schema::from_unique(self.canonical_fields().map(str::to_string).collect())
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for FieldMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (canonical, variants) in iter {
            mapping.insert(canonical, variants.into_iter().map(Into::into).collect());
        }
        mapping
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (canonical, variants) in &self.entries {
            map.serialize_entry(canonical, variants)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldMappingVisitor;

        impl<'de> Visitor<'de> for FieldMappingVisitor {
            type Value = FieldMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of canonical field names to arrays of variant names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = FieldMapping::new();
                while let Some((canonical, variants)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    mapping.insert(canonical, variants);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(FieldMappingVisitor)
    }
}
