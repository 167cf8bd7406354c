//! Cropping annotation rectangles out of downloaded images

use crate::error::FetchError;
use image::{DynamicImage, ImageFormat};
use std::path::Path;
use wildex_core::BoundingBox;

/// Cut `bbox` out of `image`; the rectangle must be non-empty and fully inside
pub fn crop(image: &DynamicImage, bbox: BoundingBox) -> Result<DynamicImage, FetchError> {
    let (image_width, image_height) = (image.width(), image.height());
    let bad_area = || FetchError::BadExtractArea {
        left: bbox.left,
        top: bbox.top,
        width: bbox.width,
        height: bbox.height,
        image_width,
        image_height,
    };

    if bbox.width == 0 || bbox.height == 0 {
        return Err(bad_area());
    }
    let right = bbox.left.checked_add(bbox.width).ok_or_else(bad_area)?;
    let bottom = bbox.top.checked_add(bbox.height).ok_or_else(bad_area)?;
    if right > image_width || bottom > image_height {
        return Err(bad_area());
    }

    Ok(image.crop_imm(bbox.left, bbox.top, bbox.width, bbox.height))
}

/// Decode `bytes`, crop to `bbox` and write the result to `dest`.
///
/// The output format follows the extension of `dest`, falling back to the
/// format of the downloaded bytes.
pub fn crop_and_save(bytes: &[u8], bbox: BoundingBox, dest: &Path) -> Result<(), FetchError> {
    let image = image::load_from_memory(bytes).map_err(FetchError::Decode)?;
    let cropped = crop(&image, bbox)?;

    let format = match ImageFormat::from_path(dest) {
        Ok(format) => format,
        Err(_) => image::guess_format(bytes)
            .map_err(|_| FetchError::UnknownFormat(dest.to_path_buf()))?,
    };

    // jpeg has no alpha; webp only encodes 8-bit rgb(a)
    let cropped = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(cropped.to_rgb8()),
        ImageFormat::WebP => DynamicImage::ImageRgba8(cropped.to_rgba8()),
        _ => cropped,
    };

    cropped
        .save_with_format(dest, format)
        .map_err(|source| FetchError::Write {
            path: dest.to_path_buf(),
            source,
        })
}
