use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use archthumb_model::{
    ImageFormat, LegacyVodRecord, TowerCardRecord, VideoId, canonical_file_name,
};
use tracing::{debug, info, warn};

use crate::{
    encode::{self, DEFAULT_JPEG_QUALITY},
    error::{ExtractError, FetchError, Result},
    fetch::ImageFetcher,
    ledger::{FsLedger, OutputLedger},
    selection::select_best_thumbnail_url,
};

/// Tally of what one materialization pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub total: usize,
    pub written: usize,
    pub already_present: usize,
    pub no_thumbnail: usize,
    pub fetch_failures: usize,
}

impl fmt::Display for MaterializeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} written, {} already present, {} without thumbnail, {} unreadable",
            self.total,
            self.written,
            self.already_present,
            self.no_thumbnail,
            self.fetch_failures
        )
    }
}

enum RemoteOutcome {
    Written,
    Unreadable(FetchError),
}

/// Writes canonical `video-<id>.<ext>` thumbnails into an output directory.
///
/// Records are processed strictly one after another. Integrity violations and
/// local I/O failures abort the pass; download and decode failures only skip
/// the record they belong to.
#[derive(Clone)]
pub struct ThumbnailMaterializer {
    fetcher: Option<Arc<dyn ImageFetcher>>,
    ledger: Arc<dyn OutputLedger>,
    jpeg_quality: u8,
}

impl fmt::Debug for ThumbnailMaterializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailMaterializer")
            .field("has_fetcher", &self.fetcher.is_some())
            .field("jpeg_quality", &self.jpeg_quality)
            .finish_non_exhaustive()
    }
}

impl ThumbnailMaterializer {
    /// A materializer backed by the filesystem ledger and no network access.
    ///
    /// That is enough for tower cards; the remote pass needs
    /// [`with_fetcher`](Self::with_fetcher).
    pub fn new() -> Self {
        Self {
            fetcher: None,
            ledger: Arc::new(FsLedger),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn ImageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn with_ledger(mut self, ledger: Arc<dyn OutputLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    /// JPEG quality for re-encoded downloads, clamped to `1..=100`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Copies the locally stored thumbnail of every tower card.
    ///
    /// The output keeps the source file's extension verbatim: whatever follows
    /// the last `.` of the file name, so `.thumb` yields `thumb` and a name
    /// without a dot yields an empty extension.
    pub async fn materialize_from_local_source(
        &self,
        tower_cards: &[TowerCardRecord],
        output_dir: &Path,
    ) -> Result<MaterializeReport> {
        let mut report = MaterializeReport {
            total: tower_cards.len(),
            ..Default::default()
        };
        ensure_output_dir(output_dir).await?;

        for card in tower_cards {
            let Some(thumbnail) = card.thumbnail.as_deref() else {
                debug!("No thumbnail attached to {}", card.link);
                report.no_thumbnail += 1;
                continue;
            };

            let video_id = VideoId::from_tower_link(&card.link);
            let extension = source_extension(thumbnail);
            let target = output_dir.join(canonical_file_name(&video_id, &extension));

            if self.ledger.is_materialized(&target) {
                debug!("Skipping {}, {:?} already exists", video_id, target);
                report.already_present += 1;
                continue;
            }

            encode::copy_atomically(thumbnail, &target).await?;
            debug!("Copied {:?} to {:?}", thumbnail, target);
            report.written += 1;
        }

        Ok(report)
    }

    /// Downloads and re-encodes the best thumbnail of every legacy record.
    pub async fn materialize_from_remote_source(
        &self,
        legacy_records: &[LegacyVodRecord],
        output_dir: &Path,
    ) -> Result<MaterializeReport> {
        let fetcher = self.fetcher.as_deref().ok_or(ExtractError::MissingFetcher)?;
        let total = legacy_records.len();
        let mut report = MaterializeReport {
            total,
            ..Default::default()
        };
        ensure_output_dir(output_dir).await?;

        for (index, record) in legacy_records.iter().enumerate() {
            let Some(url) = select_best_thumbnail_url(record)? else {
                debug!("Record {} only has the processing placeholder", record.id);
                report.no_thumbnail += 1;
                continue;
            };

            let video_id = VideoId::from_legacy_id(&record.id);
            let extension = url.rsplit('.').next().unwrap_or(url);
            let format = ImageFormat::from_extension(extension)?;
            let target = output_dir.join(canonical_file_name(&video_id, format.extension()));

            if self.ledger.is_materialized(&target) {
                debug!("Skipping {}, {:?} already exists", video_id, target);
                report.already_present += 1;
                continue;
            }

            info!("Downloading image #{} out of {}", index + 1, total);
            match self.download(fetcher, url, format, target).await? {
                RemoteOutcome::Written => report.written += 1,
                RemoteOutcome::Unreadable(err) => {
                    warn!("Unable to read image {}: {}", url, err);
                    report.fetch_failures += 1;
                }
            }
        }

        Ok(report)
    }

    async fn download(
        &self,
        fetcher: &dyn ImageFetcher,
        url: &str,
        format: ImageFormat,
        target: PathBuf,
    ) -> Result<RemoteOutcome> {
        let bytes = match fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(err) => return Ok(RemoteOutcome::Unreadable(err)),
        };

        let quality = self.jpeg_quality;
        // Decode and encode are CPU bound; awaited before the next record starts.
        tokio::task::spawn_blocking(move || -> Result<RemoteOutcome> {
            let image = match encode::decode_image(&bytes) {
                Ok(image) => image,
                Err(err) => return Ok(RemoteOutcome::Unreadable(err)),
            };
            encode::write_image_atomically(&target, &image, format, quality)?;
            Ok(RemoteOutcome::Written)
        })
        .await?
    }
}

impl Default for ThumbnailMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything after the last `.` of the file name, empty when there is none.
fn source_extension(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_owned())
        .unwrap_or_default()
}

async fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| ExtractError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_extension_follows_last_dot_of_file_name() {
        assert_eq!(source_extension(Path::new("/a/b/thumb.jpg")), "jpg");
        assert_eq!(source_extension(Path::new("cover.final.JPEG")), "JPEG");
        assert_eq!(source_extension(Path::new("/a/.thumb")), "thumb");
        assert_eq!(source_extension(Path::new("/a.d/noext")), "");
        assert_eq!(source_extension(Path::new("trailing.")), "");
    }

    #[test]
    fn debug_output_reports_fetcher_presence() {
        let text = format!("{:?}", ThumbnailMaterializer::new());
        assert!(text.contains("has_fetcher: false"), "{text}");
        assert!(!text.contains("dyn "), "{text}");
    }

    #[tokio::test]
    async fn remote_pass_without_fetcher_is_rejected() {
        let out = tempfile::tempdir().unwrap();
        let err = ThumbnailMaterializer::new()
            .materialize_from_remote_source(&[], out.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingFetcher), "{err:?}");
    }
}
