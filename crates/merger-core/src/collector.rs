//! Raw field-name collection for the discovery phase.

use std::collections::HashSet;

use merger_model::RawRecord;

/// Accumulates the distinct raw field names seen across records.
///
/// Names are compared exactly as read: `"Email"` and `" email"` are two
/// fields here. Names are kept in first-seen order so the list handed to
/// the mapping provider is reproducible.
#[derive(Debug, Clone, Default)]
pub struct FieldCollector {
    fields: Vec<String>,
    seen: HashSet<String>,
}

impl FieldCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &RawRecord) {
        for key in record.keys() {
            if !self.seen.contains(key) {
                self.seen.insert(key.to_string());
                self.fields.push(key.to_string());
            }
        }
    }

    pub fn observe_all<'a>(&mut self, records: impl IntoIterator<Item = &'a RawRecord>) {
        for record in records {
            self.observe(record);
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.seen.contains(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

/// Collects the distinct raw field names of `records`.
pub fn collect_fields<'a>(records: impl IntoIterator<Item = &'a RawRecord>) -> Vec<String> {
    let mut collector = FieldCollector::new();
    collector.observe_all(records);
    collector.into_fields()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keys: &[&str]) -> RawRecord {
        keys.iter().map(|key| (*key, "v")).collect()
    }

    #[test]
    fn test_union_across_records() {
        let records = [
            record(&["Name", "Email"]),
            record(&["Email", "Phone"]),
            record(&[]),
        ];
        assert_eq!(collect_fields(&records), vec!["Name", "Email", "Phone"]);
    }

    #[test]
    fn test_case_and_whitespace_sensitive() {
        let records = [record(&["Email", "email", " Email "])];
        let fields = collect_fields(&records);
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let collector = FieldCollector::new();
        assert!(collector.is_empty());
        assert!(collect_fields(&Vec::<RawRecord>::new()).is_empty());
    }

    #[test]
    fn test_observe_accumulates() {
        let mut collector = FieldCollector::new();
        collector.observe(&record(&["a"]));
        collector.observe(&record(&["b", "a"]));
        assert_eq!(collector.len(), 2);
        assert!(collector.contains("b"));
        assert!(!collector.contains("c"));
    }
}
