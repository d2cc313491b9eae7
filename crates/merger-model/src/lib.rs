//! Core data types shared by every stage of the merge pipeline.
//!
//! - [`RawRecord`] / [`RawValue`]: one source row as read from an input file
//! - [`FieldMapping`]: canonical field name to the raw variants it subsumes
//! - [`Schema`] / [`NormalizedRecord`]: one row in canonical shape
//! - [`Chunk`]: a sequence-numbered batch of normalized rows

#![deny(unsafe_code)]

pub mod chunk;
pub mod error;
pub mod mapping;
pub mod record;
pub mod value;

pub use chunk::Chunk;
pub use error::{ModelError, Result};
pub use mapping::{FieldMapping, normalize_key};
pub use record::{NormalizedRecord, RawRecord, Schema};
pub use value::RawValue;
