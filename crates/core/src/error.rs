/// Domain-level error taxonomy.
///
/// The HTTP layer maps each variant onto a status code; variants that map to
/// 5xx keep their detail for the server log only.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Image processing failed: {0}")]
    Processing(String),
}
