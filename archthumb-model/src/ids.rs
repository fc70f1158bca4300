use std::fmt;

/// Marker the legacy archive puts in front of every video id.
pub const LEGACY_ID_PREFIX: &str = "v";

/// Identifier of an archived video, as used in canonical file names.
///
/// Ids are derived positionally from whichever record describes the video and
/// are assumed unique within one run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Last `/`-separated segment of a tower card link.
    ///
    /// A link with a trailing slash yields an empty id.
    pub fn from_tower_link(link: &str) -> Self {
        let last = link.rsplit('/').next().unwrap_or(link);
        Self(last.to_owned())
    }

    /// Legacy record id with its leading `v` removed, if present.
    pub fn from_legacy_id(id: &str) -> Self {
        Self(id.strip_prefix(LEGACY_ID_PREFIX).unwrap_or(id).to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
