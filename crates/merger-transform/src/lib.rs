//! Record transformation: cleanse raw values and reshape rows into the
//! canonical schema.
//!
//! Both stages are pure: they never fail and never touch shared state, so a
//! row can be normalized the same way in any pass.

#![deny(unsafe_code)]

pub mod cleanse;
pub mod normalize;

pub use cleanse::{cleanse, cleanse_str, is_allowed_char, is_printable_ascii};
pub use normalize::{RowNormalizer, normalize_row};
