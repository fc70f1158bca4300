//! Image decode / re-encode and the atomic file writes behind both
//! materializers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use archthumb_model::ImageFormat;
use image::{ColorType, DynamicImage, codecs::jpeg::JpegEncoder};

use crate::error::{ExtractError, FetchError, Result};

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

pub fn decode_image(bytes: &[u8]) -> std::result::Result<DynamicImage, FetchError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Encodes `image` in `format` into `writer`.
///
/// Every supported format is JPEG, so transparency is flattened to RGB.
pub fn encode_image<W: Write>(
    image: &DynamicImage,
    format: ImageFormat,
    quality: u8,
    writer: W,
) -> image::ImageResult<()> {
    match format {
        ImageFormat::Jpg | ImageFormat::Jpeg => {
            let rgb = image.to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(writer, quality);
            encoder.encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ColorType::Rgb8.into(),
            )
        }
    }
}

/// Sibling path the final file is staged under before the rename.
///
/// The suffix never looks like a canonical name, so lookups and the ledger
/// ignore leftovers from an interrupted run.
pub fn staging_path(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".tmp.{}", uuid::Uuid::new_v4().simple()));
    output_path.with_file_name(name)
}

/// Encode into a staging file, fsync it, then rename over `output_path`.
pub fn write_image_atomically(
    output_path: &Path,
    image: &DynamicImage,
    format: ImageFormat,
    quality: u8,
) -> Result<()> {
    let tmp_path = staging_path(output_path);
    let write_err = |source| ExtractError::Write {
        path: tmp_path.clone(),
        source,
    };

    {
        let file = File::create(&tmp_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        if let Err(source) = encode_image(image, format, quality, &mut writer) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ExtractError::Encode {
                path: output_path.to_path_buf(),
                source,
            });
        }
        writer.flush().map_err(write_err)?;
        writer.get_ref().sync_all().map_err(write_err)?;
    }

    publish(&tmp_path, output_path)
}

/// Copy `source` into a staging file next to `output_path`, then rename.
pub async fn copy_atomically(source: &Path, output_path: &Path) -> Result<()> {
    let tmp_path = staging_path(output_path);
    if let Err(err) = tokio::fs::copy(source, &tmp_path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(ExtractError::Copy {
            from: source.to_path_buf(),
            to: output_path.to_path_buf(),
            source: err,
        });
    }

    tokio::fs::rename(&tmp_path, output_path)
        .await
        .map_err(|source| ExtractError::Write {
            path: output_path.to_path_buf(),
            source,
        })
}

fn publish(tmp_path: &Path, output_path: &Path) -> Result<()> {
    if let Err(source) = std::fs::rename(tmp_path, output_path) {
        let _ = std::fs::remove_file(tmp_path);
        return Err(ExtractError::Write {
            path: output_path.to_path_buf(),
            source,
        });
    }

    // Best-effort fsync of parent directory to persist rename metadata
    if let Some(parent) = output_path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}
