use std::path::PathBuf;

use tracing::info;

use crate::common::result::MultirepoResult;
use crate::domain::value_objects::dot_dir::DotDir;
use crate::infrastructure::filesystem::{index_store::IndexStore, lock::DirLock};

/// Configuration for removing a repository from the index.
#[derive(Debug, Clone)]
pub struct RemoveRepositoryConfig {
    /// Directory of the workspace root.
    pub workspace_root: PathBuf,

    /// The repository directory name to remove.
    pub name: String,
}

impl RemoveRepositoryConfig {
    /// Creates a configuration removing `name`.
    pub fn new(workspace_root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            name: name.into(),
        }
    }
}

/// Removes an index entry. The repository's working tree is left alone;
/// this only forgets the entry.
pub struct RemoveRepositoryUseCase {
    config: RemoveRepositoryConfig,
}

impl RemoveRepositoryUseCase {
    /// Creates the use case.
    pub fn new(config: RemoveRepositoryConfig) -> Self {
        Self { config }
    }

    /// Removes the entry and rewrites the index. Removing an unknown
    /// name succeeds and changes nothing.
    pub async fn execute(&self) -> MultirepoResult<()> {
        let dot_dir = DotDir::at(&self.config.workspace_root);
        let _lock = DirLock::acquire(&dot_dir.lock_file_path())?;

        let store = IndexStore::new();
        let mut index = store.read(&dot_dir.index_file_path()).await?;
        index.remove_repo(&self.config.name);
        store.write(&dot_dir.index_file_path(), &index).await?;

        info!(repo = %self.config.name, "removed repository from index");
        Ok(())
    }
}
