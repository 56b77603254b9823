// File: ./src/storage.rs
// Writes the rendered task block into a note on disk.
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

/// How `insert_at_marker` placed the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// The marker line was replaced.
    AtMarker,
    /// No marker; the block went to the end of the note.
    Appended,
    /// The note did not exist yet.
    Created,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Run `f` while holding an exclusive lock on a sidecar `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Put `block` into the note at `path`.
    ///
    /// The first line equal to `marker` (ignoring surrounding whitespace) is
    /// replaced by the block. Without a marker the block is appended, separated
    /// from existing content by a newline.
    pub fn insert_at_marker(path: &Path, block: &str, marker: &str) -> Result<InsertMode> {
        Self::with_lock(path, || {
            if !path.exists() {
                Self::atomic_write(path, block)?;
                return Ok(InsertMode::Created);
            }

            let existing = fs::read_to_string(path)
                .with_context(|| format!("Failed to read note {:?}", path))?;
            let (updated, mode) = splice(&existing, block, marker);
            Self::atomic_write(path, updated)?;
            Ok(mode)
        })
    }
}

fn splice(existing: &str, block: &str, marker: &str) -> (String, InsertMode) {
    let marker = marker.trim();
    let mut offset = 0;
    for line in existing.split_inclusive('\n') {
        if !marker.is_empty() && line.trim() == marker {
            let mut out = String::with_capacity(existing.len() + block.len());
            out.push_str(&existing[..offset]);
            out.push_str(block);
            out.push_str(&existing[offset + line.len()..]);
            return (out, InsertMode::AtMarker);
        }
        offset += line.len();
    }

    let mut out = existing.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(block);
    (out, InsertMode::Appended)
}
