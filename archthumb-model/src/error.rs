use std::fmt::{self, Display};

/// Errors produced by model constructors and conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An extension that does not map onto a supported [`ImageFormat`].
    ///
    /// [`ImageFormat`]: crate::ImageFormat
    UnsupportedFormat(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnsupportedFormat(ext) => {
                write!(f, "unsupported image format extension `{ext}`")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
