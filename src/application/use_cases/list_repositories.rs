use std::path::PathBuf;

use crate::common::result::MultirepoResult;
use crate::domain::value_objects::dot_dir::DotDir;
use crate::infrastructure::filesystem::{index_store::IndexStore, lock::DirLock};

/// Configuration for listing the repository index.
#[derive(Debug, Clone)]
pub struct ListRepositoriesConfig {
    /// Directory of the workspace root.
    pub workspace_root: PathBuf,
}

impl ListRepositoriesConfig {
    /// Creates a configuration rooted at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
        }
    }
}

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoListing {
    /// The repository directory name.
    pub name: String,

    /// The recorded URL.
    pub url: String,
}

/// Reads the index and returns its entries sorted by name.
pub struct ListRepositoriesUseCase {
    config: ListRepositoriesConfig,
}

impl ListRepositoriesUseCase {
    /// Creates the use case.
    pub fn new(config: ListRepositoriesConfig) -> Self {
        Self { config }
    }

    /// Returns the listing.
    pub async fn execute(&self) -> MultirepoResult<Vec<RepoListing>> {
        let dot_dir = DotDir::at(&self.config.workspace_root);
        let _lock = DirLock::acquire(&dot_dir.lock_file_path())?;

        let index = IndexStore::new().read(&dot_dir.index_file_path()).await?;
        Ok(index
            .iter()
            .map(|(name, entry)| RepoListing {
                name: name.clone(),
                url: entry.url.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::init_workspace::{
        InitWorkspaceConfig, InitWorkspaceUseCase,
    };
    use crate::domain::entities::repo_index::RepoIndex;

    #[tokio::test]
    async fn test_listing_is_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        InitWorkspaceUseCase::new(InitWorkspaceConfig::new(dir.path()))
            .execute()
            .await
            .unwrap();

        let mut index = RepoIndex::new();
        index.add_repo("zeta", "ssh://z");
        index.add_repo("alpha", "ssh://a");
        IndexStore::new()
            .write(&DotDir::at(dir.path()).index_file_path(), &index)
            .await
            .unwrap();

        let listing = ListRepositoriesUseCase::new(ListRepositoriesConfig::new(dir.path()))
            .execute()
            .await
            .unwrap();
        let names: Vec<&str> = listing.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_uninitialized_workspace_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ListRepositoriesUseCase::new(ListRepositoriesConfig::new(dir.path()))
            .execute()
            .await;
        assert!(result.is_err());
    }
}
