use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("schema field not found: {0}")]
    UnknownField(String),
    #[error("duplicate canonical field in schema: {0}")]
    DuplicateField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
