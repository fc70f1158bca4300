//! Thumbnail resolution and materialization for archived video metadata.
//!
//! Two metadata shapes feed into one flat output directory of
//! `video-<id>.<ext>` files:
//!
//! - tower cards, whose thumbnails already exist on local disk and are copied
//!   byte for byte;
//! - legacy VOD records, whose best remote candidate is selected, validated,
//!   downloaded and re-encoded.
//!
//! The presence of a canonical file is the only record of completed work, so
//! re-running after a partial failure resumes where the last run stopped.

pub mod encode;
pub mod error;
pub mod fetch;
pub mod ledger;
pub mod lookup;
pub mod materialize;
pub mod selection;

pub use archthumb_model as model;

pub use error::{ExtractError, FetchError, IntegrityViolation, Result};
pub use fetch::{HttpImageFetcher, ImageFetcher};
pub use ledger::{FsLedger, OutputLedger};
pub use lookup::find_existing;
pub use materialize::{MaterializeReport, ThumbnailMaterializer};
pub use selection::{
    EXPECTED_RESOLUTION, PROCESSING_PLACEHOLDER_URL, select_best_thumbnail_url,
};
