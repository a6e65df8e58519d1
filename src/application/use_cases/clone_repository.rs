use std::path::PathBuf;

use tracing::info;

use crate::common::error::MultirepoError;
use crate::common::result::MultirepoResult;
use crate::domain::value_objects::{dot_dir::DotDir, scp_endpoint::ScpEndpoint};
use crate::infrastructure::filesystem::{index_store::IndexStore, lock::DirLock};
use crate::infrastructure::git::{CloneOptions, GitClient};

/// Configuration for cloning a repository into the workspace.
#[derive(Debug, Clone)]
pub struct CloneRepositoryConfig {
    /// Directory of the workspace root.
    pub workspace_root: PathBuf,

    /// The scp-like endpoint to clone.
    pub endpoint: String,

    /// Stream git's output to the terminal.
    pub verbose: bool,

    /// Echo executed commands.
    pub print_commands: bool,
}

impl CloneRepositoryConfig {
    /// Creates a configuration for cloning `endpoint`.
    pub fn new(workspace_root: impl Into<PathBuf>, endpoint: impl Into<String>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            endpoint: endpoint.into(),
            verbose: false,
            print_commands: false,
        }
    }

    /// Enables streaming of git's own output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables command echoing.
    pub fn with_print_commands(mut self, print_commands: bool) -> Self {
        self.print_commands = print_commands;
        self
    }
}

/// Clones a repository and records it in the index.
pub struct CloneRepositoryUseCase {
    config: CloneRepositoryConfig,
    git: GitClient,
}

impl CloneRepositoryUseCase {
    /// Creates the use case.
    pub fn new(config: CloneRepositoryConfig) -> Self {
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

    /// Clones the configured endpoint into the workspace and adds it to
    /// the repository index under its derived name.
    pub async fn execute(&self) -> MultirepoResult<()> {
        let dot_dir = DotDir::at(&self.config.workspace_root);
        let _lock = DirLock::acquire(&dot_dir.lock_file_path())?;

        let store = IndexStore::new();
        let mut index = store.read(&dot_dir.index_file_path()).await?;

        let endpoint = ScpEndpoint::parse(&self.config.endpoint)
            .ok_or_else(|| MultirepoError::InvalidRepositoryUrl(self.config.endpoint.clone()))?;

        let options = CloneOptions {
            verbose: self.config.verbose,
            echo_commands: self.config.print_commands,
        };
        self.git
            .clone_repository(&endpoint.to_string(), endpoint.name(), &options)
            .await?;

        index.add_repo(endpoint.name(), endpoint.to_string());
        store.write(&dot_dir.index_file_path(), &index).await?;

        info!(repo = endpoint.name(), "cloned repository");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::init_workspace::{
        InitWorkspaceConfig, InitWorkspaceUseCase,
    };

    async fn init_workspace(dir: &std::path::Path) {
        InitWorkspaceUseCase::new(InitWorkspaceConfig::new(dir))
            .execute()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_rejected_before_cloning() {
        let dir = tempfile::tempdir().unwrap();
        init_workspace(dir.path()).await;

        let config = CloneRepositoryConfig::new(dir.path(), "https://github.com/user/repo");
        let result = CloneRepositoryUseCase::new(config).execute().await;
        assert!(matches!(
            result,
            Err(MultirepoError::InvalidRepositoryUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_successful_clone_updates_the_index() {
        let dir = tempfile::tempdir().unwrap();
        init_workspace(dir.path()).await;

        // `true` accepts any arguments and exits zero, which is all the
        // use case needs from git here.
        let config = CloneRepositoryConfig::new(dir.path(), "git@example.org:user/tool");
        let use_case =
            CloneRepositoryUseCase::new(config).with_git_client(GitClient::with_executable("true"));
        use_case.execute().await.unwrap();

        let store = IndexStore::new();
        let index = store
            .read(&DotDir::at(dir.path()).index_file_path())
            .await
            .unwrap();
        assert_eq!(
            index.get("tool").unwrap().url,
            "ssh://git@example.org/user/tool"
        );
    }

    #[tokio::test]
    async fn test_failed_clone_leaves_the_index_alone() {
        let dir = tempfile::tempdir().unwrap();
        init_workspace(dir.path()).await;

        let config = CloneRepositoryConfig::new(dir.path(), "git@example.org:user/tool");
        let use_case = CloneRepositoryUseCase::new(config)
            .with_git_client(GitClient::with_executable("false"));
        assert!(use_case.execute().await.is_err());

        let store = IndexStore::new();
        let index = store
            .read(&DotDir::at(dir.path()).index_file_path())
            .await
            .unwrap();
        assert!(index.is_empty());
    }
}
