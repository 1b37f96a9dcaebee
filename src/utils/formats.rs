use std::path::Path;
use std::str::FromStr;
use crate::utils::ProcessingError;

/// Source formats accepted for derivative generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    JPEG,
    PNG,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }

    /// JPEG cannot carry an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, Self::PNG)
    }
}

impl FromStr for ImageFormat {
    type Err = ProcessingError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            _ => Err(ProcessingError::format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Get format from the text after the last `.` of the file name.
///
/// A bare name like `.png` counts as a PNG: only the suffix matters.
pub fn format_from_extension(path: impl AsRef<Path>) -> Result<ImageFormat, ProcessingError> {
    let path = path.as_ref();
    let ext = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .ok_or_else(|| ProcessingError::format(
            format!("File has no extension: {}", path.display())
        ))?;

    ImageFormat::from_str(ext)
}

/// Whether a file name carries one of the accepted extensions (any case).
pub fn is_eligible(path: impl AsRef<Path>) -> bool {
    format_from_extension(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions_in_any_case() {
        for name in ["a.jpg", "b.JPG", "c.jpeg", "d.JpEg", "e.png", "f.PNG"] {
            assert!(is_eligible(name), "{name} should be eligible");
        }
    }

    #[test]
    fn suffix_only_names_are_eligible() {
        for name in [".png", ".JPG", "A/.jpeg"] {
            assert!(is_eligible(name), "{name} should be eligible");
        }
        assert_eq!(format_from_extension(".JPG").unwrap(), ImageFormat::JPEG);
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["a.gif", "b.webp", "c.txt", "noext", ".png.bak", "d.jpg.tmp"] {
            assert!(!is_eligible(name), "{name} should be ignored");
        }
    }

    #[test]
    fn jpeg_aliases_share_a_format() {
        assert_eq!(format_from_extension("x.jpg").unwrap(), ImageFormat::JPEG);
        assert_eq!(format_from_extension("x.JPEG").unwrap(), ImageFormat::JPEG);
        assert!(ImageFormat::PNG.matches_extension("PNG"));
        assert!(!ImageFormat::JPEG.supports_alpha());
    }
}
