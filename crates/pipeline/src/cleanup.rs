//! Fire-and-forget file deletion.
//!
//! Deletions run on their own task and report failures through `tracing`
//! only. A file that is already gone counts as removed.

use std::io;
use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;

/// Remove `path`, treating `NotFound` as success.
pub async fn remove_file(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Schedule deletion of `path` on a detached task.
///
/// `what` names the kind of file for the log line (`"staged upload"`,
/// `"stored image"`). The handle is returned for callers that want to wait;
/// request code drops it.
pub fn discard(path: PathBuf, what: &'static str) -> JoinHandle<()> {
    tokio::spawn(async move {
        match remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), what, "Removed file"),
            Err(error) => {
                tracing::error!(path = %path.display(), what, %error, "File cleanup failed")
            }
        }
    })
}

/// Deletion for `Drop` impls, which may run outside a Tokio runtime.
pub(crate) fn discard_from_drop(path: PathBuf, what: &'static str) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(error) = remove_file(&path).await {
                    tracing::error!(path = %path.display(), what, %error, "File cleanup failed");
                }
            });
        }
        Err(_) => match std::fs::remove_file(&path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => {
                tracing::error!(path = %path.display(), what, %error, "File cleanup failed");
            }
            _ => {}
        },
    }
}
