//! Accepted upload media types.
//!
//! Only three raster formats are accepted for client and project photos.
//! The declared `Content-Type` of the multipart part decides acceptance; the
//! bytes themselves are sniffed later when the image is decoded.

use crate::error::CoreError;

/// Message returned to clients when an upload has any other type.
pub const UNSUPPORTED_IMAGE_MESSAGE: &str = "Unsupported image type. Use JPG, PNG, or WEBP only.";

/// An accepted image media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
}

impl MediaType {
    /// Every accepted type, in the order they are advertised.
    pub const ALL: [MediaType; 3] = [MediaType::Jpeg, MediaType::Png, MediaType::Webp];

    /// Parse a declared MIME type such as `image/png`.
    ///
    /// Parameters (`; charset=...`) and letter case are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        Self::ALL
            .into_iter()
            .find(|t| t.mime().eq_ignore_ascii_case(essence))
    }

    /// Like [`MediaType::from_mime`] but produces the domain error for a
    /// missing or rejected type.
    pub fn from_declared(mime: Option<&str>) -> Result<Self, CoreError> {
        mime.and_then(Self::from_mime)
            .ok_or_else(|| CoreError::UnsupportedMediaType(UNSUPPORTED_IMAGE_MESSAGE.into()))
    }

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
        }
    }

    /// Extension used when the original filename offers nothing usable.
    pub fn canonical_extension(self) -> &'static str {
        match self {
            MediaType::Jpeg => "jpg",
            MediaType::Png => "png",
            MediaType::Webp => "webp",
        }
    }

    /// Extensions that are accepted as-is from an uploaded filename.
    pub fn extension_aliases(self) -> &'static [&'static str] {
        match self {
            MediaType::Jpeg => &["jpg", "jpeg"],
            MediaType::Png => &["png"],
            MediaType::Webp => &["webp"],
        }
    }

    /// Pick the on-disk extension for an upload.
    ///
    /// Keeps the original filename's extension (lowercased) when it agrees
    /// with the declared type, otherwise falls back to the canonical one.
    pub fn extension_for(self, original_name: Option<&str>) -> String {
        let original = original_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match original {
            Some(ext) if self.extension_aliases().contains(&ext.as_str()) => ext,
            _ => self.canonical_extension().to_string(),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}
