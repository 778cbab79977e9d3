//! Scratch file with automatic cleanup
//!
//! The storage workload acquires its file through [`TempFile`] so the file
//! is removed on every exit path: explicitly via [`TempFile::remove`] on
//! success (surfacing removal errors), or by `Drop` if the workload bails
//! out early.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use crate::TEMP_FILE_PREFIX;

/// Temporary benchmark file, removed when dropped.
pub struct TempFile {
    path: PathBuf,
    pub file: File,
    cleanup_on_drop: bool,
}

impl TempFile {
    /// Create the scratch file inside `dir`, truncating any stale leftover
    /// from a previous run of the same process id.
    pub fn create(dir: &Path) -> io::Result<Self> {
        let name = format!("{}{}.dat", TEMP_FILE_PREFIX, process::id());
        let path = dir.join(name);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            path,
            file,
            cleanup_on_drop: true,
        })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disable automatic cleanup (for debugging)
    pub fn keep_on_drop(&mut self) {
        self.cleanup_on_drop = false;
    }

    /// Remove the file now, surfacing the error if removal fails.
    pub fn remove(mut self) -> io::Result<()> {
        self.cleanup_on_drop = false;
        fs::remove_file(&self.path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.cleanup_on_drop {
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_and_drop_removes_file() {
        let dir = tempdir().unwrap();

        let temp = TempFile::create(dir.path()).unwrap();
        let path = temp.path().to_owned();
        assert!(path.exists());

        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn explicit_remove_reports_success() {
        let dir = tempdir().unwrap();

        let temp = TempFile::create(dir.path()).unwrap();
        let path = temp.path().to_owned();

        temp.remove().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn keep_on_drop_leaves_file() {
        let dir = tempdir().unwrap();

        let mut temp = TempFile::create(dir.path()).unwrap();
        temp.keep_on_drop();
        let path = temp.path().to_owned();

        drop(temp);
        assert!(path.exists());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let result = TempFile::create(Path::new("/nonexistent/rigmark/scratch"));
        assert!(result.is_err());
    }
}
