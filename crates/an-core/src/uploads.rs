//! Directories that receive annotation uploads verbatim.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::{ensure_dir, sanitize_filename};

/// Which kind of annotation result an upload directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Tab-separated binary mask exported by the client.
    Binary,
    /// The drawing canvas rendered as an image.
    MaskedImage,
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadKind::Binary => f.write_str("binary data"),
            UploadKind::MaskedImage => f.write_str("masked image"),
        }
    }
}

/// A fixed directory where uploaded files are stored under their own names.
#[derive(Debug, Clone)]
pub struct UploadDir {
    kind: UploadKind,
    dir: PathBuf,
}

impl UploadDir {
    pub fn new(kind: UploadKind, dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            dir: dir.into(),
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` to `{dir}/{filename}`, replacing any existing file.
    ///
    /// The filename must be a single plain path component. Returns the path
    /// that was written.
    pub fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let name = sanitize_filename(filename)?;
        ensure_dir(&self.dir)?;

        let path = self.dir.join(name);
        std::fs::write(&path, data)?;

        tracing::info!(
            kind = %self.kind,
            bytes = data.len(),
            "Saved {} to {}",
            self.kind,
            path.display()
        );
        Ok(path)
    }
}
