//! Integration tests for staging, ingesting and handing off uploads.
//!
//! Every test works in its own temporary upload directory.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assert_matches::assert_matches;
use futures::StreamExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use landing_core::media::MediaType;
use landing_pipeline::{ImageGeometry, PipelineError, UploadConfig, UploadStorage};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn storage() -> (TempDir, UploadStorage) {
    let tmp = tempfile::tempdir().unwrap();
    let storage = UploadStorage::init(UploadConfig {
        dir: tmp.path().join("uploads"),
        staging_dir: tmp.path().join("staging"),
        public_prefix: "uploads".to_string(),
    })
    .await
    .unwrap();
    (tmp, storage)
}

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8()),
        _ => DynamicImage::ImageRgba8(image),
    };
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

/// Detached cleanup tasks finish shortly after the call that spawned them.
async fn wait_until_gone(path: &Path) {
    for _ in 0..200 {
        if !path.exists() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{} still exists", path.display());
}

/// Waits out a transform still running on the blocking pool.
async fn wait_until_empty(dir: &Path) {
    for _ in 0..3000 {
        if files_in(dir).is_empty() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{} still holds {:?}", dir.display(), files_in(dir));
}

// ---------------------------------------------------------------------------
// Test: init creates nested directories and is idempotent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn init_creates_missing_parents() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("a").join("b").join("uploads");
    let staging_dir = tmp.path().join("c").join("staging");
    let config = UploadConfig {
        dir: dir.clone(),
        staging_dir: staging_dir.clone(),
        public_prefix: "uploads".to_string(),
    };

    UploadStorage::init(config.clone()).await.unwrap();
    UploadStorage::init(config).await.unwrap();

    assert!(dir.is_dir());
    assert!(staging_dir.is_dir());
}

// ---------------------------------------------------------------------------
// Test: staging writes a uniquely named temp file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stage_writes_unique_temp_files() {
    let (_tmp, storage) = storage().await;
    let bytes = encoded(10, 10, ImageFormat::Png);

    let a = storage
        .stage_bytes(MediaType::Png, Some("photo.png"), &bytes)
        .await
        .unwrap();
    let b = storage
        .stage_bytes(MediaType::Png, Some("photo.png"), &bytes)
        .await
        .unwrap();

    assert_ne!(a.path(), b.path());
    assert_eq!(a.path().parent().unwrap(), storage.staging_dir());
    assert!(files_in(storage.dir()).is_empty());
    let name = a.path().file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("temp-") && name.ends_with(".png"), "{name}");
    assert_eq!(a.size(), bytes.len() as u64);
    assert_eq!(std::fs::read(a.path()).unwrap(), bytes);

    a.discard().await.unwrap();
    b.discard().await.unwrap();
    assert!(files_in(storage.staging_dir()).is_empty());
}

#[tokio::test]
async fn stage_failure_removes_partial_file() {
    let (_tmp, storage) = storage().await;
    let chunks = futures::stream::iter(vec![
        Ok(b"partial".to_vec()),
        Err("connection reset"),
    ]);

    let result = storage.stage(MediaType::Jpeg, Some("a.jpg"), chunks).await;

    assert_matches!(result, Err(PipelineError::Stream(msg)) if msg == "connection reset");
    assert!(files_in(storage.staging_dir()).is_empty());
}

#[tokio::test]
async fn abandoned_stage_removes_partial_file() {
    let (_tmp, storage) = storage().await;
    let chunks = futures::stream::iter(vec![Ok::<_, String>(b"partial".to_vec())])
        .chain(futures::stream::pending());

    let result = tokio::time::timeout(
        Duration::from_millis(100),
        storage.stage(MediaType::Png, Some("a.png"), chunks),
    )
    .await;

    assert!(result.is_err(), "stage should still be waiting for the stream");
    wait_until_empty(storage.staging_dir()).await;
}

// ---------------------------------------------------------------------------
// Test: ingestion produces exact geometry and removes the staged file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ingest_png_cover_fits_client_geometry() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Png, Some("me.png"), &encoded(800, 600, ImageFormat::Png))
        .await
        .unwrap();
    let temp = staged.path().to_path_buf();

    let stored = storage.ingest(staged, ImageGeometry::CLIENT).await.unwrap();

    assert!(stored.relative_path().starts_with("uploads/client-"));
    assert!(stored.relative_path().ends_with(".png"));
    assert_eq!(image::image_dimensions(stored.path()).unwrap(), (300, 300));
    wait_until_gone(&temp).await;

    let path = stored.path().to_path_buf();
    let relative = stored.commit();
    assert!(path.exists());
    assert_eq!(relative, format!("uploads/{}", path.file_name().unwrap().to_str().unwrap()));
}

#[tokio::test]
async fn ingest_jpeg_keeps_format_and_project_geometry() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Jpeg, Some("site.JPEG"), &encoded(640, 1000, ImageFormat::Jpeg))
        .await
        .unwrap();

    let stored = storage.ingest(staged, ImageGeometry::PROJECT).await.unwrap();

    assert!(stored.relative_path().ends_with(".jpeg"));
    let bytes = std::fs::read(stored.path()).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    assert_eq!(image::image_dimensions(stored.path()).unwrap(), (450, 350));
    stored.commit();
}

#[tokio::test]
async fn ingest_webp_keeps_format() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Webp, Some("pic.webp"), &encoded(500, 500, ImageFormat::WebP))
        .await
        .unwrap();

    let stored = storage.ingest(staged, ImageGeometry::CLIENT).await.unwrap();

    let bytes = std::fs::read(stored.path()).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
    assert_eq!(image::image_dimensions(stored.path()).unwrap(), (300, 300));
    stored.commit();
}

// ---------------------------------------------------------------------------
// Test: corrupt input leaves nothing behind
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ingest_corrupt_image_fails_and_cleans_up() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Png, Some("broken.png"), b"\x89PNG but not really")
        .await
        .unwrap();
    let temp = staged.path().to_path_buf();

    let result = storage.ingest(staged, ImageGeometry::PROJECT).await;

    assert_matches!(result, Err(PipelineError::Image(_)) | Err(PipelineError::Io(_)));
    wait_until_gone(&temp).await;
    assert!(files_in(storage.dir()).is_empty());
}

// ---------------------------------------------------------------------------
// Test: a caller that stops waiting leaves nothing behind
// ---------------------------------------------------------------------------

#[tokio::test]
async fn abandoned_ingest_removes_the_final_image() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Png, Some("big.png"), &encoded(2000, 2000, ImageFormat::Png))
        .await
        .unwrap();

    let result = tokio::time::timeout(
        Duration::from_millis(1),
        storage.ingest(staged, ImageGeometry::CLIENT),
    )
    .await;

    assert!(result.is_err(), "ingest should still be transforming");
    wait_until_empty(storage.staging_dir()).await;
    wait_until_empty(storage.dir()).await;
}

// ---------------------------------------------------------------------------
// Test: the ownership token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn release_deletes_the_artifact() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Png, None, &encoded(50, 50, ImageFormat::Png))
        .await
        .unwrap();
    let stored = storage.ingest(staged, ImageGeometry::CLIENT).await.unwrap();
    let path = stored.path().to_path_buf();

    stored.release().await.unwrap();

    assert!(!path.exists());
}

#[tokio::test]
async fn dropping_an_uncommitted_image_deletes_it() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Png, None, &encoded(50, 50, ImageFormat::Png))
        .await
        .unwrap();
    let stored = storage.ingest(staged, ImageGeometry::CLIENT).await.unwrap();
    let path = stored.path().to_path_buf();

    drop(stored);

    wait_until_gone(&path).await;
}

#[tokio::test]
async fn dropping_a_staged_upload_deletes_it() {
    let (_tmp, storage) = storage().await;
    let staged = storage
        .stage_bytes(MediaType::Png, None, b"bytes")
        .await
        .unwrap();
    let path = staged.path().to_path_buf();

    drop(staged);

    wait_until_gone(&path).await;
}
