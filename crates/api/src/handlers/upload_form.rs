//! Multipart form reading shared by the image-bearing create handlers.
//!
//! Text parts are collected in memory; the `image` file part is type-checked
//! from its declared `Content-Type` and then streamed straight into the
//! staging directory. Whatever goes wrong after staging, the staged file is
//! discarded before the error reaches the client.

use std::collections::HashMap;
use std::future::Future;

use axum::extract::Multipart;
use landing_core::error::CoreError;
use landing_core::media::MediaType;
use landing_core::validation::{non_blank, require_fields};
use landing_pipeline::{StagedUpload, StoredImage, UploadStorage};

use crate::error::{AppError, AppResult};

/// Name of the multipart part carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// A parsed multipart body whose image, if any, is staged on disk.
#[derive(Debug)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<StagedUpload>,
}

impl UploadForm {
    /// Consume the multipart body.
    ///
    /// Unknown parts are ignored. A file part with an empty filename counts
    /// as no file, as browsers send one for an untouched file input.
    pub async fn read(storage: &UploadStorage, mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self {
            fields: HashMap::new(),
            image: None,
        };
        match form.collect(storage, &mut multipart).await {
            Ok(()) => Ok(form),
            Err(err) => {
                form.discard();
                Err(err)
            }
        }
    }

    async fn collect(&mut self, storage: &UploadStorage, multipart: &mut Multipart) -> AppResult<()> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            let file_name = field.file_name().map(str::to_string);

            match file_name {
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    self.fields.insert(name, text);
                }
                Some(file_name) if name == IMAGE_FIELD && !file_name.is_empty() => {
                    if self.image.is_some() {
                        return Err(AppError::BadRequest(
                            "Only one image may be uploaded".into(),
                        ));
                    }
                    let media_type = MediaType::from_declared(field.content_type())?;
                    let staged = storage
                        .stage(media_type, Some(file_name.as_str()), field)
                        .await
                        .map_err(CoreError::from)?;
                    if staged.is_empty() {
                        drop(staged.discard());
                    } else {
                        self.image = Some(staged);
                    }
                }
                Some(_) => {} // ignore other file parts
            }
        }
        Ok(())
    }

    /// Require the named text fields and an attached image.
    ///
    /// Any missing piece fails with `message`, and the staged image (if one
    /// was received) is discarded.
    pub fn validate(mut self, required: &[&str], message: &str) -> AppResult<ValidatedUpload> {
        let outcome = {
            let checks: Vec<(&str, Option<&str>)> = required
                .iter()
                .map(|name| (*name, self.fields.get(*name).map(String::as_str)))
                .chain(std::iter::once((
                    IMAGE_FIELD,
                    self.image.as_ref().map(|_| IMAGE_FIELD),
                )))
                .collect();
            require_fields(&checks, message)
        };

        match (outcome, self.image.take()) {
            (Ok(()), Some(image)) => Ok(ValidatedUpload {
                fields: self.fields,
                image,
            }),
            (outcome, image) => {
                if let Some(image) = image {
                    drop(image.discard());
                }
                let err = outcome
                    .err()
                    .unwrap_or_else(|| CoreError::Validation(message.to_string()));
                Err(err.into())
            }
        }
    }

    fn discard(&mut self) {
        if let Some(image) = self.image.take() {
            drop(image.discard());
        }
    }
}

/// A form whose required fields are present and whose image is staged.
#[derive(Debug)]
pub struct ValidatedUpload {
    fields: HashMap<String, String>,
    image: StagedUpload,
}

impl ValidatedUpload {
    /// Trimmed value of a text field.
    pub fn text(&self, name: &str) -> String {
        non_blank(self.fields.get(name).map(String::as_str))
            .unwrap_or_default()
            .to_string()
    }

    pub fn into_image(self) -> StagedUpload {
        self.image
    }
}

/// Persist a document that references `stored`.
///
/// `insert` receives the image's storage-relative path. The image is
/// committed when the insert succeeds and released otherwise.
pub async fn persist_with_image<T, F, Fut>(stored: StoredImage, insert: F) -> AppResult<T>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    match insert(stored.relative_path().to_string()).await {
        Ok(document) => {
            stored.commit();
            Ok(document)
        }
        Err(err) => {
            drop(stored.release());
            Err(err.into())
        }
    }
}
