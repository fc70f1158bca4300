use std::path::{Path, PathBuf};

use archthumb_model::{ImageFormat, VideoId, canonical_file_name};

/// Locates an already extracted thumbnail for `video_id`.
///
/// Directories are searched in the given order. Inside each directory
/// `video-<id>.jpg` is preferred over `video-<id>.jpeg`.
pub fn find_existing<P: AsRef<Path>>(
    video_id: &VideoId,
    directories: &[P],
) -> Option<PathBuf> {
    directories
        .iter()
        .find_map(|dir| find_in_directory(video_id, dir.as_ref()))
}

fn find_in_directory(video_id: &VideoId, directory: &Path) -> Option<PathBuf> {
    ImageFormat::LOOKUP_ORDER
        .iter()
        .map(|format| directory.join(canonical_file_name(video_id, format.extension())))
        .find(|candidate| candidate.exists())
}
