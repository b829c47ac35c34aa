use landing_core::error::CoreError;

/// Failures raised while staging or transforming an upload.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The request body stream broke while the file was being received.
    #[error("Upload stream failed: {0}")]
    Stream(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The staged bytes could not be decoded, or the result could not be encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The blocking transform task panicked or was cancelled.
    #[error("Image task failed: {0}")]
    Join(String),
}

impl From<PipelineError> for CoreError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Stream(msg) => CoreError::Validation(format!("Malformed upload: {msg}")),
            other => CoreError::Processing(other.to_string()),
        }
    }
}
