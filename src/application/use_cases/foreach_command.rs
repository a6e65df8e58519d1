use std::path::PathBuf;

use tracing::debug;

use crate::common::error::MultirepoError;
use crate::common::result::MultirepoResult;
use crate::domain::value_objects::dot_dir::DotDir;
use crate::infrastructure::filesystem::{index_store::IndexStore, lock::DirLock};
use crate::infrastructure::process::{CommandExecutor, ExecutionConfig, OutputMode};

/// Name of the variable exporting the workspace root to child commands.
pub const ENV_MULTIREPO_ROOT: &str = "MULTIREPO_ROOT";

/// Name of the variable exporting this binary's path to child commands.
pub const ENV_MULTIREPO_EXECUTABLE: &str = "MULTIREPO_EXECUTABLE";

/// Configuration for running a command in every indexed repository.
#[derive(Debug, Clone)]
pub struct ForeachCommandConfig {
    /// Directory of the workspace root.
    pub workspace_root: PathBuf,

    /// Command and arguments, passed through verbatim.
    pub argv: Vec<String>,

    /// Keep iterating when a repository's command fails.
    pub keep_going: bool,

    /// Echo executed commands.
    pub print_commands: bool,
}

impl ForeachCommandConfig {
    /// Creates a configuration running `argv` in each repository.
    pub fn new(workspace_root: impl Into<PathBuf>, argv: Vec<String>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            argv,
            keep_going: false,
            print_commands: false,
        }
    }

    /// Continues past failing repositories.
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Enables command echoing.
    pub fn with_print_commands(mut self, print_commands: bool) -> Self {
        self.print_commands = print_commands;
        self
    }
}

/// One repository where the command failed.
#[derive(Debug)]
pub struct ForeachFailure {
    /// The repository directory name.
    pub repo: String,

    /// What went wrong there.
    pub error: MultirepoError,
}

/// Outcome of a foreach run.
#[derive(Debug, Default)]
pub struct ForeachResult {
    /// Repositories where the command succeeded.
    pub succeeded: usize,

    /// Repositories where it failed, in iteration order.
    pub failures: Vec<ForeachFailure>,
}

impl ForeachResult {
    /// Whether every repository succeeded.
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a command in each indexed repository, in name order.
///
/// The child inherits the terminal and additionally sees
/// `MULTIREPO_ROOT` and `MULTIREPO_EXECUTABLE`, unless the caller
/// already exported them.
pub struct ForeachCommandUseCase {
    config: ForeachCommandConfig,
}

impl ForeachCommandUseCase {
    /// Creates the use case.
    pub fn new(config: ForeachCommandConfig) -> Self {
        Self { config }
    }

    /// Runs the command everywhere. Stops at the first failure unless
    /// keep-going was requested; either way every failure is reported in
    /// the returned result rather than as an error.
    pub async fn execute(&self) -> MultirepoResult<ForeachResult> {
        if self.config.argv.is_empty() {
            return Err(MultirepoError::usage("expected at least the command name"));
        }

        let dot_dir = DotDir::at(&self.config.workspace_root);
        let _lock = DirLock::acquire(&dot_dir.lock_file_path())?;

        let store = IndexStore::new();
        let index = store.read(&dot_dir.index_file_path()).await?;

        let environment = self.child_environment()?;
        let executor = CommandExecutor::new();
        let mut result = ForeachResult::default();

        for (repo, _entry) in index.iter() {
            let mut execution = ExecutionConfig::new()
                .with_working_directory(self.config.workspace_root.join(repo))
                .with_output(OutputMode::Inherit, OutputMode::Inherit)
                .with_echo(self.config.print_commands);
            for (key, value) in &environment {
                execution = execution.with_environment_variable(key, value);
            }

            debug!(repo = %repo, "running foreach command");
            match executor.execute(&self.config.argv, &execution).await {
                Ok(_) => result.succeeded += 1,
                Err(error) => {
                    result.failures.push(ForeachFailure {
                        repo: repo.clone(),
                        error,
                    });
                    if !self.config.keep_going {
                        break;
                    }
                }
            }
        }

        Ok(result)
    }

    /// Variables exported to each child, skipping any the caller already
    /// set so that nested invocations keep the outermost values.
    fn child_environment(&self) -> MultirepoResult<Vec<(String, String)>> {
        let mut environment = Vec::new();

        if std::env::var_os(ENV_MULTIREPO_ROOT).is_none() {
            let root = std::path::absolute(&self.config.workspace_root).map_err(|source| {
                MultirepoError::filesystem_error_with_source(
                    "cannot resolve workspace root",
                    Some(self.config.workspace_root.clone()),
                    source,
                )
            })?;
            environment.push((ENV_MULTIREPO_ROOT.to_string(), root.display().to_string()));
        }

        if std::env::var_os(ENV_MULTIREPO_EXECUTABLE).is_none() {
            let executable = std::env::current_exe().map_err(|source| {
                MultirepoError::filesystem_error_with_source(
                    "cannot determine own executable path",
                    None,
                    source,
                )
            })?;
            environment.push((
                ENV_MULTIREPO_EXECUTABLE.to_string(),
                executable.display().to_string(),
            ));
        }

        Ok(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::init_workspace::{
        InitWorkspaceConfig, InitWorkspaceUseCase,
    };
    use crate::domain::entities::repo_index::RepoIndex;

    async fn workspace_with_repos(repos: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        InitWorkspaceUseCase::new(InitWorkspaceConfig::new(dir.path()))
            .execute()
            .await
            .unwrap();

        let mut index = RepoIndex::new();
        for repo in repos {
            std::fs::create_dir(dir.path().join(repo)).unwrap();
            index.add_repo(*repo, format!("ssh://git@example.org/user/{repo}"));
        }
        IndexStore::new()
            .write(&DotDir::at(dir.path()).index_file_path(), &index)
            .await
            .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_empty_command_is_a_usage_error() {
        let dir = workspace_with_repos(&[]).await;
        let config = ForeachCommandConfig::new(dir.path(), vec![]);
        let result = ForeachCommandUseCase::new(config).execute().await;
        assert!(matches!(result, Err(MultirepoError::Usage(_))));
    }

    #[tokio::test]
    async fn test_command_runs_in_every_repository() {
        let dir = workspace_with_repos(&["alpha", "beta"]).await;
        let config = ForeachCommandConfig::new(dir.path(), vec!["true".to_string()]);
        let result = ForeachCommandUseCase::new(config).execute().await.unwrap();
        assert_eq!(result.succeeded, 2);
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_first_failure_stops_iteration() {
        let dir = workspace_with_repos(&["alpha", "beta"]).await;
        let config = ForeachCommandConfig::new(dir.path(), vec!["false".to_string()]);
        let result = ForeachCommandUseCase::new(config).execute().await.unwrap();
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].repo, "alpha");
    }

    #[tokio::test]
    async fn test_keep_going_visits_every_repository() {
        let dir = workspace_with_repos(&["alpha", "beta"]).await;
        let config = ForeachCommandConfig::new(dir.path(), vec!["false".to_string()])
            .with_keep_going(true);
        let result = ForeachCommandUseCase::new(config).execute().await.unwrap();
        assert_eq!(result.failures.len(), 2);
    }
}
