use std::path::PathBuf;

use tracing::info;

use crate::common::result::MultirepoResult;
use crate::domain::value_objects::dot_dir::DotDir;
use crate::infrastructure::filesystem::{index_store::IndexStore, lock::DirLock};
use crate::infrastructure::git::GitClient;

/// Configuration for indexing repositories that are already cloned.
#[derive(Debug, Clone)]
pub struct AddRepositoryConfig {
    /// Directory of the workspace root.
    pub workspace_root: PathBuf,

    /// Repository directory names, relative to the workspace root.
    pub repos: Vec<String>,

    /// Echo executed commands.
    pub print_commands: bool,
}

impl AddRepositoryConfig {
    /// Creates a configuration indexing `repos`.
    pub fn new(workspace_root: impl Into<PathBuf>, repos: Vec<String>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            repos,
            print_commands: false,
        }
    }

    /// Enables command echoing.
    pub fn with_print_commands(mut self, print_commands: bool) -> Self {
        self.print_commands = print_commands;
        self
    }
}

/// Records already-cloned repositories in the index, discovering each
/// URL from the repository's own `origin` remote.
pub struct AddRepositoryUseCase {
    config: AddRepositoryConfig,
    git: GitClient,
}

impl AddRepositoryUseCase {
    /// Creates the use case.
    pub fn new(config: AddRepositoryConfig) -> Self {
        Self {
            config,
            git: GitClient::new(),
        }
    }

    /// Replaces the git client, mainly for tests.
    pub fn with_git_client(mut self, git: GitClient) -> Self {
        self.git = git;
        self
    }

    /// Discovers each repository's URL and rewrites the index. A failed
    /// discovery aborts the run before anything is written.
    pub async fn execute(&self) -> MultirepoResult<()> {
        let dot_dir = DotDir::at(&self.config.workspace_root);
        let _lock = DirLock::acquire(&dot_dir.lock_file_path())?;

        let store = IndexStore::new();
        let mut index = store.read(&dot_dir.index_file_path()).await?;

        for repo in &self.config.repos {
            // The URL may legitimately come back empty, say when the
            // remote is not named origin; record it anyway and let the
            // user fix the entry.
            let url = self
                .git
                .remote_origin_url(
                    &self.config.workspace_root.join(repo),
                    self.config.print_commands,
                )
                .await?;
            index.add_repo(repo.clone(), url);
            info!(repo = %repo, "indexed repository");
        }

        store.write(&dot_dir.index_file_path(), &index).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::init_workspace::{
        InitWorkspaceConfig, InitWorkspaceUseCase,
    };

    /// A fake git that prints a fixed URL, standing in for
    /// `git config --get remote.origin.url`.
    fn fake_git(dir: &std::path::Path, url: &str) -> String {
        let path = dir.join("fake-git");
        std::fs::write(&path, format!("#!/bin/sh\necho {url}\n")).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path.display().to_string()
    }

    #[tokio::test]
    async fn test_discovered_urls_end_up_in_the_index() {
        let dir = tempfile::tempdir().unwrap();
        InitWorkspaceUseCase::new(InitWorkspaceConfig::new(dir.path()))
            .execute()
            .await
            .unwrap();
        std::fs::create_dir(dir.path().join("tool")).unwrap();

        let git = GitClient::with_executable(fake_git(
            dir.path(),
            "ssh://git@example.org/user/tool",
        ));
        let config = AddRepositoryConfig::new(dir.path(), vec!["tool".to_string()]);
        AddRepositoryUseCase::new(config)
            .with_git_client(git)
            .execute()
            .await
            .unwrap();

        let index = IndexStore::new()
            .read(&DotDir::at(dir.path()).index_file_path())
            .await
            .unwrap();
        assert_eq!(
            index.get("tool").unwrap().url,
            "ssh://git@example.org/user/tool"
        );
    }

    #[tokio::test]
    async fn test_failed_discovery_aborts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        InitWorkspaceUseCase::new(InitWorkspaceConfig::new(dir.path()))
            .execute()
            .await
            .unwrap();
        std::fs::create_dir(dir.path().join("tool")).unwrap();

        let config = AddRepositoryConfig::new(dir.path(), vec!["tool".to_string()]);
        let result = AddRepositoryUseCase::new(config)
            .with_git_client(GitClient::with_executable("false"))
            .execute()
            .await;
        assert!(result.is_err());

        let index = IndexStore::new()
            .read(&DotDir::at(dir.path()).index_file_path())
            .await
            .unwrap();
        assert!(index.is_empty());
    }
}
