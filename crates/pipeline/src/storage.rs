//! The upload directory and the operations that write into it.

use std::convert::Infallible;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use landing_core::media::MediaType;
use tokio::io::AsyncWriteExt;

use crate::cleanup;
use crate::error::PipelineError;
use crate::geometry::ImageGeometry;
use crate::new_token;
use crate::staged::StagedUpload;
use crate::stored::StoredImage;
use crate::transform;

/// Where uploads live on disk and how documents refer to them.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory holding finalized images.
    pub dir: PathBuf,
    /// Directory holding raw uploads while they are processed. Must not be
    /// served publicly.
    pub staging_dir: PathBuf,
    /// Leading segment of the stored relative path, also the URL prefix
    /// the directory is served under.
    pub public_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            staging_dir: PathBuf::from("uploads-staging"),
            public_prefix: "uploads".to_string(),
        }
    }
}

/// A ready-to-use upload directory.
///
/// Built once at startup with [`UploadStorage::init`]; request handlers share
/// it through application state and never create directories themselves.
#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
    staging_dir: PathBuf,
    public_prefix: String,
}

impl UploadStorage {
    /// Ensure the upload and staging directories (and their parents) exist.
    pub async fn init(config: UploadConfig) -> Result<Self, PipelineError> {
        tokio::fs::create_dir_all(&config.dir).await?;
        tokio::fs::create_dir_all(&config.staging_dir).await?;
        tracing::info!(
            dir = %config.dir.display(),
            staging_dir = %config.staging_dir.display(),
            "Upload directory ready",
        );
        Ok(Self {
            dir: config.dir,
            staging_dir: config.staging_dir,
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// URL segment the directory is served under, without slashes.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Storage-relative path persisted in documents, e.g. `uploads/client-....jpg`.
    pub fn relative_path(&self, filename: &str) -> String {
        format!("{}/{filename}", self.public_prefix)
    }

    /// Stream an accepted upload to a uniquely named staging file.
    ///
    /// The media type must already have been accepted by the caller. The
    /// file is owned by a [`StagedUpload`] from the moment it is created, so
    /// a failed or abandoned write never leaves it behind.
    pub async fn stage<S, B, E>(
        &self,
        media_type: MediaType,
        original_name: Option<&str>,
        chunks: S,
    ) -> Result<StagedUpload, PipelineError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        let extension = media_type.extension_for(original_name);
        let path = self.staging_dir.join(format!("temp-{}.{extension}", new_token()));

        let mut file = tokio::fs::File::create(&path).await?;
        let mut staged = StagedUpload::new(path, media_type, extension);
        let mut chunks = std::pin::pin!(chunks);

        let written: Result<(), PipelineError> = async {
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk.map_err(|e| PipelineError::Stream(e.to_string()))?;
                let bytes = chunk.as_ref();
                file.write_all(bytes).await?;
                staged.record_written(bytes.len() as u64);
            }
            file.flush().await?;
            Ok(())
        }
        .await;
        drop(file);

        if let Err(err) = written {
            // Wait for the removal so the error is returned with nothing left on disk.
            let _ = staged.discard().await;
            return Err(err);
        }

        tracing::debug!(path = %staged.path().display(), size = staged.size(), %media_type, "Upload staged");
        Ok(staged)
    }

    /// Stage an upload that is already fully in memory.
    pub async fn stage_bytes(
        &self,
        media_type: MediaType,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StagedUpload, PipelineError> {
        let chunks = futures::stream::iter([Ok::<_, Infallible>(bytes)]);
        self.stage(media_type, original_name, chunks).await
    }

    /// Cover-fit a staged upload into `geometry` and finalize it.
    ///
    /// The staged file is always scheduled for deletion once the transform
    /// has finished, whatever its outcome. On failure no final file is left
    /// behind.
    ///
    /// The work runs on its own task. If the caller stops waiting, the task
    /// still completes and its [`StoredImage`] is dropped uncommitted, which
    /// removes the final file.
    pub async fn ingest(
        &self,
        staged: StagedUpload,
        geometry: ImageGeometry,
    ) -> Result<StoredImage, PipelineError> {
        let storage = self.clone();
        tokio::spawn(async move { storage.finalize(staged, geometry).await })
            .await
            .map_err(|e| PipelineError::Join(e.to_string()))?
    }

    async fn finalize(
        &self,
        staged: StagedUpload,
        geometry: ImageGeometry,
    ) -> Result<StoredImage, PipelineError> {
        let filename = format!("{}-{}.{}", geometry.prefix, new_token(), staged.extension());
        let final_path = self.dir.join(&filename);

        let source = staged.path().to_path_buf();
        let target = final_path.clone();
        let media_type = staged.media_type();
        let outcome = tokio::task::spawn_blocking(move || {
            transform::cover_fit(&source, &target, media_type, geometry)
        })
        .await;

        drop(staged.discard());

        match outcome {
            Ok(Ok(())) => {
                tracing::info!(
                    path = %final_path.display(),
                    width = geometry.width,
                    height = geometry.height,
                    "Image finalized",
                );
                Ok(StoredImage::new(final_path, self.relative_path(&filename)))
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "Image transform failed");
                Err(err)
            }
            Err(join_err) => {
                if let Err(error) = cleanup::remove_file(&final_path).await {
                    tracing::error!(path = %final_path.display(), %error, "Failed to remove partial image");
                }
                Err(PipelineError::Join(join_err.to_string()))
            }
        }
    }
}
