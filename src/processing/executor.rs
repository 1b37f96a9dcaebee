//! Per-file unit of work: decode once, write both derivatives.
//!
//! Units are synchronous and run on tokio's blocking thread pool via
//! [`crate::worker::WorkerPool`]. Every failure is returned as a
//! [`ProcessingError`] so the folder worker can count it against the file.

use std::borrow::Cow;
use std::path::Path;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::core::{DerivativeKind, ImageTask};
use crate::processing::batch::BatchConfig;
use crate::utils::{
    ImageFormat,
    ProcessingError,
    ProcessingResult,
    ensure_parent_dir,
    extract_filename,
    format_from_extension,
};

use super::resize::{FINAL_WIDTH, THUMBNAIL_WIDTH, decode, resize_to_width};

/// Produces the derivatives for one [`ImageTask`].
pub trait DerivativeProcessor: Send + Sync + 'static {
    fn process(&self, task: &ImageTask) -> ProcessingResult<()>;
}

/// Default processor: resizes with the `image` crate and writes in the source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivativeWriter {
    pub final_width: u32,
    pub thumbnail_width: u32,
}

impl DerivativeWriter {
    pub fn new(final_width: u32, thumbnail_width: u32) -> Self {
        Self {
            final_width,
            thumbnail_width,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(config.final_width, config.thumbnail_width)
    }

    fn width_for(&self, kind: DerivativeKind) -> u32 {
        match kind {
            DerivativeKind::Final => self.final_width,
            DerivativeKind::Thumbnail => self.thumbnail_width,
        }
    }
}

impl Default for DerivativeWriter {
    fn default() -> Self {
        Self::new(FINAL_WIDTH, THUMBNAIL_WIDTH)
    }
}

impl DerivativeProcessor for DerivativeWriter {
    fn process(&self, task: &ImageTask) -> ProcessingResult<()> {
        let format = format_from_extension(&task.input_path)?;
        let image = decode(&task.input_path)?;

        debug!(
            "Loaded '{}': {}×{}",
            task.file_name(),
            image.width(),
            image.height()
        );

        for kind in [DerivativeKind::Final, DerivativeKind::Thumbnail] {
            let resized = resize_to_width(&image, self.width_for(kind));
            let output_path = task.output_path(kind);
            save_derivative(&resized, output_path, format)?;

            debug!(
                "'{}' → {} {}×{}",
                extract_filename(output_path),
                kind.dir_name(),
                resized.width(),
                resized.height()
            );
        }

        Ok(())
    }
}

/// Encodes `image` to `path`, creating missing parent directories first.
fn save_derivative(image: &DynamicImage, path: &Path, format: ImageFormat) -> ProcessingResult<()> {
    ensure_parent_dir(path).map_err(|e| ProcessingError::write(path, e))?;

    let image = if format.supports_alpha() {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
    };

    image
        .save_with_format(path, encoder_format(format))
        .map_err(|e| ProcessingError::write(path, e))
}

fn encoder_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::JPEG => image::ImageFormat::Jpeg,
        ImageFormat::PNG => image::ImageFormat::Png,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn task_in(dir: &Path, name: &str) -> ImageTask {
        ImageTask {
            input_path: dir.join("in").join(name),
            final_path: dir.join("final/A").join(name),
            thumbnail_path: dir.join("thumbnail/A").join(name),
        }
    }

    #[test]
    fn writes_both_derivatives_into_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let task = task_in(dir.path(), "photo.PNG");
        std::fs::create_dir_all(task.input_path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(40, 10, Rgba([10, 20, 30, 128]))
            .save_with_format(&task.input_path, image::ImageFormat::Png)
            .unwrap();

        DerivativeWriter::new(80, 8).process(&task).unwrap();

        let final_image = image::open(&task.final_path).unwrap();
        assert_eq!(final_image.dimensions(), (80, 20));
        let thumb = image::open(&task.thumbnail_path).unwrap();
        assert_eq!(thumb.dimensions(), (8, 2));
    }

    #[test]
    fn jpeg_output_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let task = task_in(dir.path(), "photo.jpeg");
        std::fs::create_dir_all(task.input_path.parent().unwrap()).unwrap();
        image::RgbImage::new(12, 6)
            .save_with_format(&task.input_path, image::ImageFormat::Jpeg)
            .unwrap();

        DerivativeWriter::new(24, 6).process(&task).unwrap();

        assert_eq!(image::open(&task.final_path).unwrap().dimensions(), (24, 12));
        assert_eq!(image::open(&task.thumbnail_path).unwrap().dimensions(), (6, 3));
    }

    #[test]
    fn corrupt_source_is_a_decode_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let task = task_in(dir.path(), "broken.jpg");
        std::fs::create_dir_all(task.input_path.parent().unwrap()).unwrap();
        std::fs::write(&task.input_path, b"garbage").unwrap();

        let err = DerivativeWriter::default().process(&task).unwrap_err();
        assert!(matches!(err, ProcessingError::Decode { .. }), "{err}");
        assert!(!task.final_path.exists());
        assert!(!task.thumbnail_path.exists());
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut task = task_in(dir.path(), "photo.png");
        std::fs::create_dir_all(task.input_path.parent().unwrap()).unwrap();
        image::RgbImage::new(4, 4)
            .save_with_format(&task.input_path, image::ImageFormat::Png)
            .unwrap();
        // A regular file where the destination directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        task.final_path = blocker.join("photo.png");

        let err = DerivativeWriter::new(8, 2).process(&task).unwrap_err();
        assert!(matches!(err, ProcessingError::Write { .. }), "{err}");
    }
}
