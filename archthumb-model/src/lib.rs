//! Record types and canonical naming shared across archthumb crates.
//!
//! Everything in here is plain data: the upstream metadata parsers hand us
//! these shapes already populated, and the core crate decides what to do with
//! them.

pub mod error;
pub mod ids;
pub mod image;
pub mod records;

pub use error::{ModelError, Result as ModelResult};
pub use ids::VideoId;
pub use image::{ImageFormat, canonical_file_name};
pub use records::{LegacyVodRecord, ThumbnailCandidate, TowerCardRecord};
