use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::common::error::MultirepoError;
use crate::common::result::MultirepoResult;
use crate::domain::entities::repo_index::RepoIndex;

/// Reads and writes the JSON repository index.
///
/// Callers are expected to hold the workspace lock around every
/// read-modify-write cycle; the store itself does no locking.
#[derive(Debug, Default)]
pub struct IndexStore;

impl IndexStore {
    /// Creates a new store.
    pub fn new() -> Self {
        Self
    }

    /// Reads the index. A missing file is an error: the workspace must
    /// have been initialized first.
    pub async fn read(&self, path: &Path) -> MultirepoResult<RepoIndex> {
        let data = fs::read(path).await.map_err(|source| {
            MultirepoError::filesystem_error_with_source(
                "cannot read repository index",
                Some(path.to_path_buf()),
                source,
            )
        })?;
        let index: RepoIndex = serde_json::from_slice(&data).map_err(|source| {
            MultirepoError::serialization_error("repository index is not valid JSON", source)
        })?;
        debug!(path = %path.display(), repos = index.len(), "loaded repository index");
        Ok(index)
    }

    /// Writes the index, pretty-printed with a trailing newline so the
    /// file diffs well under version control.
    pub async fn write(&self, path: &Path, index: &RepoIndex) -> MultirepoResult<()> {
        let mut data = serde_json::to_vec_pretty(index).map_err(|source| {
            MultirepoError::serialization_error("cannot encode repository index", source)
        })?;
        data.push(b'\n');
        fs::write(path, data).await.map_err(|source| {
            MultirepoError::filesystem_error_with_source(
                "cannot write repository index",
                Some(path.to_path_buf()),
                source,
            )
        })?;
        debug!(path = %path.display(), repos = index.len(), "wrote repository index");
        Ok(())
    }

    /// Whether a regular file exists at `path`. Anything that exists but
    /// is not a regular file is an error.
    pub async fn file_exists(&self, path: &Path) -> MultirepoResult<bool> {
        match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => Ok(true),
            Ok(_) => Err(MultirepoError::filesystem_error(
                "unexpected file type",
                Some(path.to_path_buf()),
            )),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(MultirepoError::filesystem_error_with_source(
                "cannot stat file",
                Some(path.to_path_buf()),
                source,
            )),
        }
    }
}
