use std::fmt;
use std::str::FromStr;

use crate::VideoId;
use crate::error::{ModelError, Result};

/// Output formats the materializer knows how to encode.
///
/// Both variants are JPEG; they only differ in the extension written to disk,
/// which is part of the canonical file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageFormat {
    Jpg,
    Jpeg,
}

impl ImageFormat {
    /// Extensions checked by lookups, in priority order.
    pub const LOOKUP_ORDER: [ImageFormat; 2] = [ImageFormat::Jpg, ImageFormat::Jpeg];

    /// Maps a file extension (without the dot) onto a format.
    ///
    /// Matching is exact; `JPG` is rejected rather than normalized.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            "jpg" => Ok(ImageFormat::Jpg),
            "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(ModelError::UnsupportedFormat(other.to_owned())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}

/// `video-<id>.<ext>`, the name used both as output and as the "done" marker.
pub fn canonical_file_name(video_id: &VideoId, extension: &str) -> String {
    let mut name =
        String::with_capacity(6 + video_id.as_str().len() + 1 + extension.len());
    name.push_str("video-");
    name.push_str(video_id.as_str());
    name.push('.');
    name.push_str(extension);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_keeps_extension_verbatim() {
        let id = VideoId::new("42");
        assert_eq!(canonical_file_name(&id, "jpg"), "video-42.jpg");
        assert_eq!(canonical_file_name(&id, "PNG"), "video-42.PNG");
        assert_eq!(canonical_file_name(&id, ""), "video-42.");
    }

    #[test]
    fn format_lookup_is_case_sensitive() {
        assert_eq!(ImageFormat::from_extension("jpg"), Ok(ImageFormat::Jpg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Ok(ImageFormat::Jpeg));
        assert_eq!(
            ImageFormat::from_extension("JPG"),
            Err(ModelError::UnsupportedFormat("JPG".into()))
        );
        assert!("png".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn lookup_order_prefers_jpg() {
        assert_eq!(ImageFormat::LOOKUP_ORDER[0].extension(), "jpg");
        assert_eq!(ImageFormat::LOOKUP_ORDER[1].extension(), "jpeg");
    }
}
