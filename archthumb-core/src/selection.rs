use archthumb_model::{LegacyVodRecord, ThumbnailCandidate};

use crate::error::IntegrityViolation;

/// Placeholder the VOD CDN serves for videos that never got a thumbnail.
pub const PROCESSING_PLACEHOLDER_URL: &str =
    "https://vod-secure.twitch.tv/_404/404_processing_640x360.png";

/// Resolution marker every real legacy thumbnail carries in its file name.
pub const EXPECTED_RESOLUTION: &str = "640x360";

const EXPECTED_SUFFIXES: [&str; 2] = [".jpg", ".jpeg"];

/// Picks the URL that best represents a legacy record.
///
/// Returns `Ok(None)` when the record points at the processing placeholder,
/// which means the video legitimately has no thumbnail. Every other
/// surprise is an [`IntegrityViolation`].
///
/// When several candidates share the highest preference the first one in list
/// order is treated as the maximum.
pub fn select_best_thumbnail_url(
    record: &LegacyVodRecord,
) -> Result<Option<&str>, IntegrityViolation> {
    let primary = record.thumbnail.as_str();
    let best = max_preference(&record.thumbnails).ok_or_else(|| {
        IntegrityViolation::NoCandidates {
            id: record.id.clone(),
        }
    })?;

    if primary != best.url {
        return Err(IntegrityViolation::PreferenceMismatch {
            primary: primary.to_owned(),
            max_preference: best.url.clone(),
        });
    }

    if primary == PROCESSING_PLACEHOLDER_URL {
        return Ok(None);
    }

    let file_name = primary.rsplit('/').next().unwrap_or(primary);
    if !file_name.contains(EXPECTED_RESOLUTION) {
        return Err(IntegrityViolation::UnexpectedResolution {
            url: primary.to_owned(),
        });
    }

    if !EXPECTED_SUFFIXES.iter().any(|suffix| primary.ends_with(suffix)) {
        return Err(IntegrityViolation::UnexpectedFormat {
            url: primary.to_owned(),
        });
    }

    Ok(Some(primary))
}

fn max_preference(candidates: &[ThumbnailCandidate]) -> Option<&ThumbnailCandidate> {
    candidates.iter().reduce(|best, candidate| {
        if candidate.preference > best.preference {
            candidate
        } else {
            best
        }
    })
}
