use std::{fs, path::Path};

use archthumb_core::{ExtractError, MaterializeReport, ThumbnailMaterializer};
use archthumb_model::TowerCardRecord;

/// Tower cards never touch the network, so no fetcher is configured.
fn materializer() -> ThumbnailMaterializer {
    ThumbnailMaterializer::new()
}

fn card(link: &str, thumbnail: Option<&Path>) -> TowerCardRecord {
    TowerCardRecord {
        link: link.to_owned(),
        thumbnail: thumbnail.map(Path::to_path_buf),
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn copies_thumbnails_under_canonical_names() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let first = src.path().join("thumb-a.jpg");
    let second = src.path().join("cover.JPEG");
    fs::write(&first, b"first image bytes").unwrap();
    fs::write(&second, b"second image bytes").unwrap();

    let cards = vec![
        card("https://www.twitch.tv/videos/111", Some(first.as_path())),
        card("https://www.twitch.tv/videos/222", Some(second.as_path())),
    ];

    let report = materializer()
        .materialize_from_local_source(&cards, out.path())
        .await
        .unwrap();

    assert_eq!(
        report,
        MaterializeReport {
            total: 2,
            written: 2,
            ..Default::default()
        }
    );
    assert_eq!(file_names(out.path()), vec!["video-111.jpg", "video-222.JPEG"]);
    assert_eq!(
        fs::read(out.path().join("video-111.jpg")).unwrap(),
        b"first image bytes"
    );
    assert_eq!(
        fs::read(out.path().join("video-222.JPEG")).unwrap(),
        b"second image bytes"
    );
}

#[tokio::test]
async fn cards_without_thumbnail_write_nothing() {
    let out = tempfile::tempdir().unwrap();
    let cards = vec![card("https://www.twitch.tv/videos/333", None)];

    let report = materializer()
        .materialize_from_local_source(&cards, out.path())
        .await
        .unwrap();

    assert_eq!(report.no_thumbnail, 1);
    assert_eq!(report.written, 0);
    assert!(file_names(out.path()).is_empty());
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let thumb = src.path().join("t.jpg");
    fs::write(&thumb, b"original").unwrap();
    let cards = vec![card("https://www.twitch.tv/videos/444", Some(thumb.as_path()))];

    let m = materializer();
    m.materialize_from_local_source(&cards, out.path())
        .await
        .unwrap();

    // A changed source must not overwrite the already materialized file.
    fs::write(&thumb, b"changed").unwrap();
    let report = m
        .materialize_from_local_source(&cards, out.path())
        .await
        .unwrap();

    assert_eq!(report.already_present, 1);
    assert_eq!(report.written, 0);
    assert_eq!(file_names(out.path()), vec!["video-444.jpg"]);
    assert_eq!(fs::read(out.path().join("video-444.jpg")).unwrap(), b"original");
}

#[tokio::test]
async fn creates_missing_output_directory() {
    let src = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("nested").join("thumbs");
    let thumb = src.path().join("t.jpeg");
    fs::write(&thumb, b"x").unwrap();

    materializer()
        .materialize_from_local_source(
            &[card("https://www.twitch.tv/videos/555", Some(thumb.as_path()))],
            &out,
        )
        .await
        .unwrap();

    assert!(out.join("video-555.jpeg").is_file());
}

#[tokio::test]
async fn unreadable_source_aborts_the_run() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let missing = src.path().join("missing.jpg");
    let present = src.path().join("present.jpg");
    fs::write(&present, b"x").unwrap();

    let cards = vec![
        card("https://www.twitch.tv/videos/1", Some(missing.as_path())),
        card("https://www.twitch.tv/videos/2", Some(present.as_path())),
    ];

    let err = materializer()
        .materialize_from_local_source(&cards, out.path())
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Copy { .. }), "{err:?}");
    assert!(file_names(out.path()).is_empty());
}

#[tokio::test]
async fn dotfile_thumbnail_keeps_name_after_the_dot() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let dotfile = src.path().join(".thumb");
    let bare = src.path().join("thumbnail");
    fs::write(&dotfile, b"hidden").unwrap();
    fs::write(&bare, b"bare").unwrap();

    materializer()
        .materialize_from_local_source(
            &[
                card("https://www.twitch.tv/videos/61", Some(dotfile.as_path())),
                card("https://www.twitch.tv/videos/62", Some(bare.as_path())),
            ],
            out.path(),
        )
        .await
        .unwrap();

    assert_eq!(file_names(out.path()), vec!["video-61.thumb", "video-62."]);
    assert_eq!(fs::read(out.path().join("video-61.thumb")).unwrap(), b"hidden");
}
