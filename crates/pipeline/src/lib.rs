//! Image ingestion pipeline for client and project photos.
//!
//! An upload moves through four stages:
//!
//! 1. **Stage**: the raw bytes are streamed to `temp-{token}.{ext}` inside the
//!    private staging directory ([`UploadStorage::stage`]).
//! 2. **Transform**: the staged file is decoded and cover-fitted to the target
//!    geometry on the blocking pool ([`UploadStorage::ingest`]).
//! 3. **Finalize**: the result is written straight to `{prefix}-{token}.{ext}`
//!    and the staged file is scheduled for deletion.
//! 4. **Hand-off**: the caller receives a [`StoredImage`] and either commits it
//!    into a persisted document or releases it, which deletes the file.
//!
//! Every deletion goes through [`cleanup`] and runs as a detached task, so
//! cleanup never delays or fails a response.

pub mod cleanup;
pub mod error;
pub mod geometry;
pub mod staged;
pub mod storage;
pub mod stored;
mod transform;

pub use error::PipelineError;
pub use geometry::ImageGeometry;
pub use staged::StagedUpload;
pub use storage::{UploadConfig, UploadStorage};
pub use stored::StoredImage;

/// Collision-resistant, time-ordered token used in staged and final names.
pub(crate) fn new_token() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}
