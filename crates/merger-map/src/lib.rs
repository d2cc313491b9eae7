//! Canonical field mapping: where it comes from and how it is looked up.
//!
//! # Features
//!
//! - **Reverse lookup**: [`ReverseMap`] resolves a raw column name to its
//!   canonical field, case- and whitespace-insensitively
//! - **Providers**: [`MappingProvider`] proposes a [`FieldMapping`] from the
//!   raw field names gathered during discovery. [`ChatMappingProvider`] asks
//!   an OpenAI-compatible chat-completion endpoint, [`FileMappingProvider`]
//!   reuses a mapping saved by an earlier run.
//! - **Persistence**: [`save_mapping_payload`] / [`load_mapping`]

#![deny(unsafe_code)]

mod chat;
mod error;
mod file;
mod payload;
mod provider;
mod reverse;

pub use chat::{
    ChatMappingConfig, ChatMappingProvider, DEFAULT_API_BASE_URL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, build_prompt,
};
pub use error::{MappingError, Result};
pub use file::{FileMappingProvider, load_mapping, save_mapping_payload};
pub use payload::parse_mapping_payload;
pub use provider::{MappingProvider, StaticMappingProvider};
pub use reverse::ReverseMap;

pub use merger_model::FieldMapping;
