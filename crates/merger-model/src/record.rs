//! Raw and normalized row representations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::value::RawValue;

/// One source row: raw field names paired with their values.
///
/// Pairs keep source column order. That order is the iteration order the
/// normalizer uses, so it decides which value wins when two raw keys map to
/// the same canonical field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the last value stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug)]
struct SchemaInner {
    fields: Vec<String>,
    index: HashMap<String, usize>,
}

/// Ordered canonical field names for a run.
///
/// Cheap to clone; every [`NormalizedRecord`] of a run shares one schema.
#[derive(Debug, Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate field names.
    pub fn new(fields: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if index.insert(field.clone(), position).is_some() {
                return Err(ModelError::DuplicateField(field.clone()));
            }
        }
        Ok(Self {
            inner: Arc::new(SchemaInner { fields, index }),
        })
    }

    pub(crate) fn from_unique(fields: Vec<String>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(position, field)| (field.clone(), position))
            .collect();
        Self {
            inner: Arc::new(SchemaInner { fields, index }),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.inner.fields
    }

    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.inner.index.get(field).copied()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.inner.index.contains_key(field)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.fields == other.inner.fields
    }
}

impl Eq for Schema {}

/// One row in canonical shape: exactly one cleansed value per schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    schema: Schema,
    values: Vec<String>,
}

impl NormalizedRecord {
    /// A record with every schema field set to the empty string.
    pub fn empty(schema: &Schema) -> Self {
        Self {
            schema: schema.clone(),
            values: vec![String::new(); schema.len()],
        }
    }

    /// Overwrites the value of `field`.
    pub fn set(&mut self, field: &str, value: String) -> Result<()> {
        let position = self
            .schema
            .position(field)
            .ok_or_else(|| ModelError::UnknownField(field.to_string()))?;
        self.values[position] = value;
        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.schema
            .position(field)
            .map(|position| self.values[position].as_str())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.schema.fields().iter().map(String::as_str)
    }

    /// Values in schema order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys()
            .zip(self.values.iter().map(String::as_str))
    }
}
