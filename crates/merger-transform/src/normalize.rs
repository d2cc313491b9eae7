//! Reshaping raw rows into the canonical schema.

use merger_map::{FieldMapping, ReverseMap};
use merger_model::{NormalizedRecord, RawRecord, Schema, normalize_key};

use crate::cleanse::cleanse;

/// Maps one raw row onto `schema`.
///
/// Every schema field starts out empty. Each raw key is normalized and
/// looked up in `reverse`; a hit stores the cleansed value under the
/// canonical field, overwriting whatever an earlier raw key in the same row
/// put there. Keys that resolve to nothing are dropped.
pub fn normalize_row(row: &RawRecord, schema: &Schema, reverse: &ReverseMap) -> NormalizedRecord {
    let mut normalized = NormalizedRecord::empty(schema);
    for (raw_key, value) in row.iter() {
        let Some(canonical) = reverse.get(&normalize_key(raw_key)) else {
            continue;
        };
        if normalized.set(canonical, cleanse(value)).is_err() {
            tracing::debug!(
                raw_key = %raw_key,
                canonical = %canonical,
                "reverse map names a field outside the schema"
            );
        }
    }
    normalized
}

/// Schema and reverse map bundled for the transform phase.
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    schema: Schema,
    reverse: ReverseMap,
}

impl RowNormalizer {
    pub fn new(schema: Schema, reverse: ReverseMap) -> Self {
        Self { schema, reverse }
    }

    /// Derives the schema and reverse map from `mapping`.
    pub fn from_mapping(mapping: &FieldMapping) -> Self {
        Self::new(mapping.schema(), ReverseMap::build(mapping))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn reverse_map(&self) -> &ReverseMap {
        &self.reverse
    }

    pub fn normalize(&self, row: &RawRecord) -> NormalizedRecord {
        normalize_row(row, &self.schema, &self.reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merger_model::RawValue;

    fn normalizer() -> RowNormalizer {
        let mapping: FieldMapping = [
            ("Name", vec!["Full Name", "name"]),
            ("Email", vec!["email", "E-mail Address"]),
            ("Phone", vec!["phone"]),
        ]
        .into_iter()
        .collect();
        RowNormalizer::from_mapping(&mapping)
    }

    #[test]
    fn test_unmatched_row_has_every_field_empty() {
        let row: RawRecord = [("unrelated", "x")].into_iter().collect();
        let record = normalizer().normalize(&row);
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("Name", ""), ("Email", ""), ("Phone", "")]
        );
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let row: RawRecord = [(" FULL NAME ", "Ada Lovelace"), ("PHONE", "555-0100")]
            .into_iter()
            .collect();
        let record = normalizer().normalize(&row);
        assert_eq!(record.get("Name"), Some("Ada Lovelace"));
        assert_eq!(record.get("Phone"), Some("555-0100"));
        assert_eq!(record.get("Email"), Some(""));
    }

    #[test]
    fn test_last_matching_key_wins() {
        let mut row = RawRecord::new();
        row.push("email", "first@example.com");
        row.push("E-mail Address", "second@example.com");
        let record = normalizer().normalize(&row);
        assert_eq!(record.get("Email"), Some("second@example.com"));
    }

    #[test]
    fn test_values_are_cleansed() {
        let mut row = RawRecord::new();
        row.push("name", "  <b>Zoë</b>  ");
        row.push("phone", RawValue::Integer(5550100));
        let record = normalizer().normalize(&row);
        assert_eq!(record.get("Name"), Some("bZob"));
        assert_eq!(record.get("Phone"), Some("5550100"));
    }
}
