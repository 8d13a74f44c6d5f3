//! Indexed record store for per-image predictions.
//!
//! A plain text file where line `N` holds the value for image index `N`.
//! Writes may arrive sparse and out of order; gaps are padded with empty
//! placeholder lines so positions always line up with indices. The file is
//! created on first write, only ever grows, and is rewritten in full on every
//! upsert.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::fs::ensure_parent_dir;

/// Highest index accepted by [`RecordStore::upsert`].
///
/// Every upsert materialises the whole file in memory, so an unbounded index
/// from a client would let a single request allocate without limit.
pub const MAX_INDEX: usize = 1_000_000;

/// Line-oriented store keyed by zero-based position.
///
/// All access goes through one mutex, so the read-modify-write cycle of
/// [`upsert`](Self::upsert) is atomic with respect to other callers in the
/// same process.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store backed by `path`. The file does not need to exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the record at `index` to `value`, padding any gap with empty lines.
    pub fn upsert(&self, index: usize, value: &str) -> Result<()> {
        if index > MAX_INDEX {
            return Err(Error::validation(format!(
                "index {index} exceeds the maximum of {MAX_INDEX}"
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(Error::validation("value must not contain line breaks"));
        }

        let _guard = self.lock.lock();

        let mut records = read_records(&self.path)?;
        let previous_len = records.len();
        if index >= records.len() {
            records.resize(index + 1, String::new());
        }
        records[index] = value.to_owned();

        write_records(&self.path, &records)?;

        tracing::debug!(
            path = %self.path.display(),
            index,
            previous_len,
            len = records.len(),
            "Record stored"
        );
        Ok(())
    }

    /// Read every record currently persisted. Missing file means no records.
    pub fn records(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock();
        read_records(&self.path)
    }

    /// Number of records currently persisted.
    pub fn len(&self) -> Result<usize> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn read_records(path: &Path) -> Result<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents.lines().map(str::to_owned).collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Replace the file with `records`, one newline-terminated line each.
///
/// Content goes to a temporary sibling first and is renamed into place, so
/// the previous contents survive a failed write.
fn write_records(path: &Path, records: &[String]) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for record in records {
            writeln!(writer, "{record}")?;
        }
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::from(e.error))?;
    Ok(())
}
