use std::path::PathBuf;

use tokio::fs;
use tracing::info;

use crate::common::error::MultirepoError;
use crate::common::result::MultirepoResult;
use crate::domain::value_objects::dot_dir::DotDir;
use crate::infrastructure::filesystem::{index_store::IndexStore, lock::DirLock};
use crate::infrastructure::process::echo_command;

/// Configuration for initializing a workspace.
#[derive(Debug, Clone)]
pub struct InitWorkspaceConfig {
    /// Directory that becomes the workspace root.
    pub workspace_root: PathBuf,

    /// Echo the equivalent shell commands while running.
    pub print_commands: bool,
}

impl InitWorkspaceConfig {
    /// Creates a configuration rooted at `workspace_root`.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            print_commands: false,
        }
    }

    /// Enables command echoing.
    pub fn with_print_commands(mut self, print_commands: bool) -> Self {
        self.print_commands = print_commands;
        self
    }
}

/// Creates the workspace control directory and an empty repository index.
pub struct InitWorkspaceUseCase {
    config: InitWorkspaceConfig,
}

impl InitWorkspaceUseCase {
    /// Creates the use case.
    pub fn new(config: InitWorkspaceConfig) -> Self {
        Self { config }
    }

    /// Initializes the workspace. Safe to run twice: an existing index
    /// file is left untouched.
    pub async fn execute(&self) -> MultirepoResult<()> {
        let dot_dir = DotDir::at(&self.config.workspace_root);

        if self.config.print_commands {
            echo_command(&format!("mkdir -p {}", dot_dir.path().display()));
        }
        fs::create_dir_all(dot_dir.path()).await.map_err(|source| {
            MultirepoError::filesystem_error_with_source(
                "cannot create control directory",
                Some(dot_dir.path().to_path_buf()),
                source,
            )
        })?;

        let _lock = DirLock::acquire(&dot_dir.lock_file_path())?;

        let store = IndexStore::new();
        let index_path = dot_dir.index_file_path();
        if !store.file_exists(&index_path).await? {
            if self.config.print_commands {
                echo_command(&format!("echo '{{}}' > {}", index_path.display()));
            }
            fs::write(&index_path, b"{}\n").await.map_err(|source| {
                MultirepoError::filesystem_error_with_source(
                    "cannot write repository index",
                    Some(index_path.clone()),
                    source,
                )
            })?;
        }

        info!(path = %dot_dir.path().display(), "initialized workspace");
        Ok(())
    }
}
