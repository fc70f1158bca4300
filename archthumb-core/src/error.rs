use std::path::PathBuf;

use archthumb_model::ModelError;
use thiserror::Error;

/// The archived data no longer matches what this tool was built against.
///
/// Any of these aborts the whole batch; a violated assumption on one record
/// may invalidate the rest of the batch too.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityViolation {
    #[error("record {id} has no thumbnail candidates")]
    NoCandidates { id: String },

    #[error(
        "Mismatch in primary url and max preference: {primary} vs {max_preference}"
    )]
    PreferenceMismatch {
        primary: String,
        max_preference: String,
    },

    #[error("Unexpected resolution for {url}")]
    UnexpectedResolution { url: String },

    #[error("Unexpected format for {url}")]
    UnexpectedFormat { url: String },
}

/// Per-record download failures. Old archive links 404 routinely, so these
/// are logged and skipped instead of aborting the run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Fatal errors for an extraction run.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("data integrity violation: {0}")]
    Integrity(#[from] IntegrityViolation),

    #[error(transparent)]
    UnsupportedFormat(#[from] ModelError),

    #[error("failed to create output directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("remote extraction needs an image fetcher")]
    MissingFetcher,

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
