//! Tests for merger-model types.

use merger_model::{FieldMapping, NormalizedRecord, RawRecord, RawValue};

#[test]
fn field_mapping_deserializes_in_payload_order() {
    let json = r#"{"Name": ["Full Name", "name"], "Email": ["E-mail", "email"], "City": []}"#;
    let mapping: FieldMapping = serde_json::from_str(json).expect("parse mapping");

    assert_eq!(
        mapping.canonical_fields().collect::<Vec<_>>(),
        vec!["Name", "Email", "City"]
    );
    assert_eq!(
        mapping.variants("Email"),
        Some(&["E-mail".to_string(), "email".to_string()][..])
    );
}

#[test]
fn field_mapping_repeated_key_keeps_first_position() {
    let json = r#"{"Name": ["a"], "Email": ["b"], "Name": ["c"]}"#;
    let mapping: FieldMapping = serde_json::from_str(json).expect("parse mapping");

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.schema().fields(), ["Name", "Email"]);
    assert_eq!(mapping.variants("Name"), Some(&["c".to_string()][..]));
}

#[test]
fn field_mapping_rejects_non_string_variants() {
    let result = serde_json::from_str::<FieldMapping>(r#"{"Name": [1, 2]}"#);
    assert!(result.is_err());

    let result = serde_json::from_str::<FieldMapping>(r#"["Name"]"#);
    assert!(result.is_err());
}

#[test]
fn field_mapping_serializes_as_object() {
    let mapping: FieldMapping = [("B", vec!["b"]), ("A", vec!["a", "aa"])]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&mapping).expect("serialize mapping");
    assert_eq!(json, r#"{"B":["b"],"A":["a","aa"]}"#);
}

#[test]
fn normalized_record_iterates_in_schema_order() {
    let mapping: FieldMapping = [("Name", vec!["name"]), ("Phone", vec!["tel"])]
        .into_iter()
        .collect();
    let schema = mapping.schema();
    let mut record = NormalizedRecord::empty(&schema);
    record.set("Phone", "555".to_string()).unwrap();

    let pairs: Vec<_> = record.iter().collect();
    assert_eq!(pairs, vec![("Name", ""), ("Phone", "555")]);
}

#[test]
fn raw_record_preserves_column_order() {
    let mut record = RawRecord::new();
    record.push("b", "2");
    record.push("a", RawValue::Integer(1));
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["b", "a"]);
}
