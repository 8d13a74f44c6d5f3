//! Listing of the input images offered to the annotation client.

use std::path::Path;

use crate::error::Result;

/// Return the names of regular files in `dir` whose extension is one of
/// `extensions`, sorted by name.
///
/// Extensions are compared case-insensitively, so `scan.PNG` is listed where
/// a plain suffix match on `.png` would skip it. They may be given with or
/// without a leading dot. A missing directory yields an empty list.
pub fn list_images<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Image directory does not exist: {}", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!("Skipping non-UTF-8 filename in {}", dir.display());
            continue;
        };
        if has_image_extension(&name, extensions) {
            images.push(name);
        }
    }

    images.sort();
    Ok(images)
}

/// Whether `name` ends in one of `extensions`, ignoring ASCII case.
pub fn has_image_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|allowed| allowed.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
}
