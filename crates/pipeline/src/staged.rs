//! A raw upload sitting in the upload directory, not yet transformed.

use std::path::{Path, PathBuf};

use landing_core::media::MediaType;
use tokio::task::JoinHandle;

use crate::cleanup;

/// A received upload written to `temp-{token}.{ext}` in the staging directory.
///
/// Never referenced by persisted data. Consumed by
/// [`UploadStorage::ingest`](crate::UploadStorage::ingest) or
/// [`StagedUpload::discard`]; if dropped without either, the file is removed.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    media_type: MediaType,
    extension: String,
    size: u64,
    armed: bool,
}

impl StagedUpload {
    pub(crate) fn new(path: PathBuf, media_type: MediaType, extension: String) -> Self {
        Self {
            path,
            media_type,
            extension,
            size: 0,
            armed: true,
        }
    }

    pub(crate) fn record_written(&mut self, bytes: u64) {
        self.size += bytes;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The declared type the upload was accepted under.
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Extension shared by the staged and the final file.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Number of bytes received.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Schedule deletion of the staged file.
    pub fn discard(mut self) -> JoinHandle<()> {
        self.armed = false;
        cleanup::discard(std::mem::take(&mut self.path), "staged upload")
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(path = %self.path.display(), "Staged upload dropped without cleanup");
            cleanup::discard_from_drop(std::mem::take(&mut self.path), "staged upload");
        }
    }
}
