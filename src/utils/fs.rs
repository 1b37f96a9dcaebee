use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::formats::is_eligible;

/// Create a directory and any missing parents
pub async fn ensure_dir(path: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(path.as_ref()).await
}

/// Blocking variant for use inside worker units: creates the parent of `path`.
pub fn ensure_parent_dir(path: impl AsRef<Path>) -> io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Immediate subdirectories of `root`, sorted by name.
pub async fn list_subfolders(root: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(root.as_ref()).await?;
    let mut folders = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false) {
            folders.push(path);
        }
    }

    folders.sort();
    Ok(folders)
}

/// Regular files directly inside `folder` with an accepted image extension, sorted by name.
pub async fn list_eligible_files(folder: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(folder.as_ref()).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_eligible(&path) {
            continue;
        }
        if fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Last path component as a string, or an empty string.
pub fn extract_filename(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_only_eligible_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.PNG", "a.jpg", "c.jpeg", ".JPG", "notes.txt", "d.gif"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let files = list_eligible_files(dir.path()).await.unwrap();
        let names: Vec<_> = files.iter().map(|p| extract_filename(p)).collect();
        assert_eq!(names, vec![".JPG", "a.jpg", "b.PNG", "c.jpeg"]);
    }

    #[tokio::test]
    async fn lists_only_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("B")).unwrap();
        std::fs::create_dir(dir.path().join("A")).unwrap();
        std::fs::write(dir.path().join("loose.jpg"), b"x").unwrap();

        let folders = list_subfolders(dir.path()).await.unwrap();
        let names: Vec<_> = folders.iter().map(|p| extract_filename(p)).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_subfolders(dir.path().join("absent")).await.is_err());
    }

    #[test]
    fn creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x/y/z.png");
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("x/y").is_dir());
    }
}
