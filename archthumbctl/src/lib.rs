//! Operator-facing pieces of `archthumbctl`: configuration and manifest
//! loading. The binary in `main.rs` wires these into `archthumb-core`.

pub mod config;
pub mod manifest;

pub use config::{ConfigSource, ExtractorConfig};
