//! Filesystem helpers shared by the stores.
//!
//! Directory creation happens here, once, right before a write, instead of
//! being scattered through every handler.

use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Ensure the directory that will hold `path` exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

/// Validate a client-supplied filename before it is joined onto a directory.
///
/// Only a single plain path component is accepted, so an upload can never
/// escape the directory it is stored in.
pub fn sanitize_filename(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(Error::validation("filename is empty"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(Error::validation(format!(
            "filename contains a path separator: {name:?}"
        )));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(Error::validation(format!("invalid filename: {name:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("results").join("binary_data");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_parent_dir_creates_parent_only() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("results").join("predictions.txt");
        ensure_parent_dir(&file).unwrap();
        assert!(file.parent().unwrap().is_dir());
        assert!(!file.exists());
    }

    #[test]
    fn ensure_parent_dir_bare_filename() {
        ensure_parent_dir(Path::new("predictions.txt")).unwrap();
    }

    #[test]
    fn sanitize_accepts_plain_names() {
        assert_eq!(sanitize_filename("image1_binary.txt").unwrap(), "image1_binary.txt");
        assert_eq!(
            sanitize_filename("image 12_result_image.png").unwrap(),
            "image 12_result_image.png"
        );
    }

    #[test]
    fn sanitize_rejects_traversal() {
        for name in ["", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png", "/abs.png", "x\0.png"] {
            assert!(
                matches!(sanitize_filename(name), Err(Error::Validation(_))),
                "accepted {name:?}"
            );
        }
    }
}
