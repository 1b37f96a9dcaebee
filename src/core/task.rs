//! Image and folder task definitions.

use std::path::{Path, PathBuf};
use crate::core::DerivativeKind;
use crate::utils::extract_filename;

/// Represents a single source image and the two derivatives written from it.
#[derive(Debug, Clone)]
pub struct ImageTask {
    /// Path to the source image file
    pub input_path: PathBuf,
    /// Where the final-size derivative is written
    pub final_path: PathBuf,
    /// Where the thumbnail derivative is written
    pub thumbnail_path: PathBuf,
}

impl ImageTask {
    pub fn output_path(&self, kind: DerivativeKind) -> &Path {
        match kind {
            DerivativeKind::Final => &self.final_path,
            DerivativeKind::Thumbnail => &self.thumbnail_path,
        }
    }

    pub fn file_name(&self) -> &str {
        extract_filename(&self.input_path)
    }
}

/// One input subfolder and its mirrored destinations.
#[derive(Debug, Clone)]
pub struct FolderTask {
    pub source: PathBuf,
    pub final_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl FolderTask {
    /// Mirrors `source`'s base name under both destination roots.
    pub fn new(
        source: impl Into<PathBuf>,
        final_root: &Path,
        thumbnail_root: &Path,
        files: Vec<PathBuf>,
    ) -> Self {
        let source = source.into();
        let name = extract_filename(&source).to_string();
        Self {
            final_dir: final_root.join(&name),
            thumbnail_dir: thumbnail_root.join(&name),
            source,
            files,
        }
    }

    pub fn name(&self) -> &str {
        extract_filename(&self.source)
    }

    /// One task per eligible file, consuming the folder task.
    pub fn into_image_tasks(self) -> Vec<ImageTask> {
        let Self { final_dir, thumbnail_dir, files, .. } = self;
        files
            .into_iter()
            .map(|input_path| {
                let name = extract_filename(&input_path).to_string();
                ImageTask {
                    final_path: final_dir.join(&name),
                    thumbnail_path: thumbnail_dir.join(&name),
                    input_path,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_folder_and_file_names() {
        let folder = FolderTask::new(
            "/in/C1/A",
            Path::new("/out/C1/final"),
            Path::new("/out/C1/thumbnail"),
            vec![PathBuf::from("/in/C1/A/one.JPG")],
        );
        assert_eq!(folder.name(), "A");
        assert_eq!(folder.final_dir, PathBuf::from("/out/C1/final/A"));

        let tasks = folder.into_image_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].file_name(), "one.JPG");
        assert_eq!(
            tasks[0].output_path(DerivativeKind::Final),
            Path::new("/out/C1/final/A/one.JPG")
        );
        assert_eq!(
            tasks[0].output_path(DerivativeKind::Thumbnail),
            Path::new("/out/C1/thumbnail/A/one.JPG")
        );
    }
}
