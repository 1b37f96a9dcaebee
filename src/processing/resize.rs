//! Width-driven resize used for both derivative sizes.

use std::path::Path;
use image::{DynamicImage, GenericImageView, imageops::FilterType};
use crate::utils::{ProcessingError, ProcessingResult};

/// Width of the "final" derivative in pixels.
pub const FINAL_WIDTH: u32 = 1800;
/// Width of the "thumbnail" derivative in pixels.
pub const THUMBNAIL_WIDTH: u32 = 240;

/// Height that keeps the source aspect ratio at `target_w`:
/// `round(src_h * target_w / src_w)`, rounding halves up.
///
/// Computed in integer arithmetic so the result is exact for any source size.
/// Never returns 0 for a non-empty source.
pub fn target_height(src_w: u32, src_h: u32, target_w: u32) -> u32 {
    if src_w == 0 {
        return 0;
    }
    let (w, h, tw) = (u64::from(src_w), u64::from(src_h), u64::from(target_w));
    let rounded = (2 * h * tw + w) / (2 * w);
    u32::try_from(rounded).unwrap_or(u32::MAX).max(1)
}

/// Decodes the image at `path`, sniffing the format from its content.
pub fn decode(path: &Path) -> ProcessingResult<DynamicImage> {
    image::io::Reader::open(path)
        .map_err(|e| ProcessingError::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| ProcessingError::decode(path, e))?
        .decode()
        .map_err(|e| ProcessingError::decode(path, e))
}

/// Resamples `image` to exactly `target_w` wide, preserving aspect ratio.
///
/// Upscales when the source is narrower than the target.
pub fn resize_to_width(image: &DynamicImage, target_w: u32) -> DynamicImage {
    let (w, h) = image.dimensions();
    let target_h = target_height(w, h, target_w);
    image.resize_exact(target_w, target_h, FilterType::Triangle)
}
