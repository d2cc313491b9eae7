//! Library half of the `master-merger` binary: configuration and logging.

pub mod config;
pub mod logging;
