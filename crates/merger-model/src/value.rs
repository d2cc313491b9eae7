use std::fmt;

/// A scalar cell value as read from a source file.
///
/// CSV cells are always [`RawValue::Text`]; workbook cells keep their
/// native type until they are cleansed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Empty, Self::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_coerces_scalars() {
        assert_eq!(RawValue::Integer(42).to_string(), "42");
        assert_eq!(RawValue::Float(1.0).to_string(), "1");
        assert_eq!(RawValue::Float(2.5).to_string(), "2.5");
        assert_eq!(RawValue::Bool(true).to_string(), "true");
        assert_eq!(RawValue::Empty.to_string(), "");
    }

    #[test]
    fn empty_detection() {
        assert!(RawValue::Empty.is_empty());
        assert!(RawValue::from("").is_empty());
        assert!(!RawValue::Integer(0).is_empty());
        assert!(RawValue::from(None).is_empty());
    }
}
