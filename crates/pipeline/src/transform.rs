//! Cover-fit resize. Blocking; run it on the blocking pool.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use landing_core::media::MediaType;

use crate::error::PipelineError;
use crate::geometry::ImageGeometry;

/// Decode `source`, fill `geometry` exactly and write the result to `target`
/// in the `media_type` format.
///
/// The image is scaled until it covers the box and the overflow is cropped
/// around the center, so the output is never letterboxed or distorted. A
/// partially written `target` is removed before an error is returned.
pub(crate) fn cover_fit(
    source: &Path,
    target: &Path,
    media_type: MediaType,
    geometry: ImageGeometry,
) -> Result<(), PipelineError> {
    let decoded = ImageReader::open(source)?.with_guessed_format()?.decode()?;
    let fitted = fill(&decoded, geometry);

    if let Err(err) = encode(&fitted, target, media_type) {
        match std::fs::remove_file(target) {
            Err(error) if error.kind() != std::io::ErrorKind::NotFound => {
                tracing::error!(path = %target.display(), %error, "Failed to remove partial image");
            }
            _ => {}
        }
        return Err(err);
    }
    Ok(())
}

fn fill(image: &DynamicImage, geometry: ImageGeometry) -> DynamicImage {
    image.resize_to_fill(geometry.width, geometry.height, FilterType::Lanczos3)
}

fn encode(image: &DynamicImage, target: &Path, media_type: MediaType) -> Result<(), PipelineError> {
    match media_type {
        // JPEG has no alpha channel.
        MediaType::Jpeg => {
            DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(target, ImageFormat::Jpeg)?
        }
        MediaType::Png => image.save_with_format(target, ImageFormat::Png)?,
        // The WebP encoder is lossless and 8-bit only.
        MediaType::Webp => {
            DynamicImage::ImageRgba8(image.to_rgba8()).save_with_format(target, ImageFormat::WebP)?
        }
    }
    Ok(())
}
