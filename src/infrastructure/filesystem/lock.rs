use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::common::error::MultirepoError;
use crate::common::result::MultirepoResult;

/// Exclusive advisory lock over the workspace control directory.
///
/// Commands that touch the repository index acquire this first and hold
/// it for their whole run; the lock is released on drop. The lock file's
/// parent directory must already exist, so acquiring the lock also
/// doubles as the "is this a workspace" check.
#[derive(Debug)]
pub struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    /// Acquires the lock, blocking until it is available.
    pub fn acquire(path: &Path) -> MultirepoResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| MultirepoError::lock_error("cannot open lock file", path, source))?;
        file.lock_exclusive()
            .map_err(|source| MultirepoError::lock_error("cannot acquire lock", path, source))?;
        debug!(path = %path.display(), "acquired workspace lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        debug!(path = %self.path.display(), "released workspace lock");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_creates_the_lock_file() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("lock");

        let lock = DirLock::acquire(&lock_path).unwrap();
        assert!(lock_path.exists());
        assert_eq!(lock.path(), lock_path);
    }

    #[test]
    fn test_lock_can_be_reacquired_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("lock");

        drop(DirLock::acquire(&lock_path).unwrap());
        let again = DirLock::acquire(&lock_path);
        assert!(again.is_ok());
    }

    #[test]
    fn test_missing_parent_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let lock_path = dir.path().join("no-such-dir").join("lock");

        let result = DirLock::acquire(&lock_path);
        assert!(matches!(result, Err(MultirepoError::Lock { .. })));
    }
}
