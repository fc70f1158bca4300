use std::path::PathBuf;

/// Entry from the modern video tower listing.
///
/// `thumbnail` points at an image that already sits on local disk next to the
/// scraped page; it is absent for videos the listing rendered without one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowerCardRecord {
    pub link: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail: Option<PathBuf>,
}

/// One remote thumbnail candidate of a legacy record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThumbnailCandidate {
    pub url: String,
    /// Higher is better.
    pub preference: f64,
}

/// Archived VOD metadata from the old archive dump.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyVodRecord {
    /// Video id with the archive's leading `v` marker, e.g. `v12345`.
    pub id: String,
    /// Primary thumbnail URL; expected to equal the best ranked candidate.
    pub thumbnail: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnails: Vec<ThumbnailCandidate>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn legacy_record_deserializes_integer_preferences() {
        let json = r#"{
            "id": "v12345",
            "thumbnail": "https://x/foo_640x360.jpg",
            "thumbnails": [{ "url": "https://x/foo_640x360.jpg", "preference": 10 }]
        }"#;
        let record: LegacyVodRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "v12345");
        assert_eq!(record.thumbnails.len(), 1);
        assert_eq!(record.thumbnails[0].preference, 10.0);
    }

    #[test]
    fn tower_card_thumbnail_is_optional() {
        let card: TowerCardRecord =
            serde_json::from_str(r#"{ "link": "https://t/videos/1" }"#).unwrap();
        assert_eq!(card.thumbnail, None);
    }
}
