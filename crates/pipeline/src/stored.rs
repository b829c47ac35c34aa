//! Ownership token for a finalized image.

use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;

use crate::cleanup;

/// A finalized image that no document owns yet.
///
/// The handler that requested the ingestion must either [`commit`] it once
/// the owning document is persisted, or [`release`] it on any failure after
/// ingestion. Dropping an uncommitted token releases it.
///
/// [`commit`]: StoredImage::commit
/// [`release`]: StoredImage::release
#[derive(Debug)]
#[must_use = "a stored image must be committed or released"]
pub struct StoredImage {
    path: PathBuf,
    relative_path: String,
    armed: bool,
}

impl StoredImage {
    pub(crate) fn new(path: PathBuf, relative_path: String) -> Self {
        Self {
            path,
            relative_path,
            armed: true,
        }
    }

    /// Filesystem location of the image.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Storage-relative path (`uploads/{filename}`) to persist in a document.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Hand the file over to the persisted document. The file is kept.
    pub fn commit(mut self) -> String {
        self.armed = false;
        std::mem::take(&mut self.relative_path)
    }

    /// Give the file up: schedules its deletion.
    pub fn release(mut self) -> JoinHandle<()> {
        self.armed = false;
        tracing::info!(path = %self.path.display(), "Releasing unowned image");
        cleanup::discard(std::mem::take(&mut self.path), "stored image")
    }
}

impl Drop for StoredImage {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(path = %self.path.display(), "Stored image dropped without commit");
            cleanup::discard_from_drop(std::mem::take(&mut self.path), "stored image");
        }
    }
}
