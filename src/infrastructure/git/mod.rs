//! Git operations, delegated to the system `git` binary.
//!
//! This tool never links a git library: every repository operation is an
//! external `git` invocation, so whatever the user's git does (config,
//! credentials, transports) applies here too.

use std::path::Path;

use crate::common::result::MultirepoResult;
use crate::infrastructure::process::command_executor::{
    CommandExecutor, ExecutionConfig, OutputMode,
};

/// Options for [`GitClient::clone_repository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneOptions {
    /// Stream git's own output to the terminal.
    pub verbose: bool,

    /// Echo the command line before running it.
    pub echo_commands: bool,
}

/// Runs git subcommands through the [`CommandExecutor`].
#[derive(Debug)]
pub struct GitClient {
    git_executable: String,
    executor: CommandExecutor,
}

impl Default for GitClient {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
            executor: CommandExecutor::new(),
        }
    }
}

impl GitClient {
    /// Creates a client using `git` from the search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client using a specific git executable.
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
            executor: CommandExecutor::new(),
        }
    }

    /// Clones `url` into `destination` under the current directory.
    pub async fn clone_repository(
        &self,
        url: &str,
        destination: &str,
        options: &CloneOptions,
    ) -> MultirepoResult<()> {
        let argv = vec![
            self.git_executable.clone(),
            "clone".to_string(),
            url.to_string(),
            destination.to_string(),
        ];
        let output = if options.verbose {
            OutputMode::Inherit
        } else {
            OutputMode::Discard
        };
        let config = ExecutionConfig::new()
            .with_output(output, output)
            .with_echo(options.echo_commands);
        self.executor.execute(&argv, &config).await?;
        Ok(())
    }

    /// Returns the URL of the `origin` remote configured in `repo_dir`,
    /// trimmed. Fails when the repository has no such configuration.
    pub async fn remote_origin_url(
        &self,
        repo_dir: &Path,
        echo_commands: bool,
    ) -> MultirepoResult<String> {
        let argv = vec![
            self.git_executable.clone(),
            "config".to_string(),
            "--get".to_string(),
            "remote.origin.url".to_string(),
        ];
        let config = ExecutionConfig::new()
            .with_working_directory(repo_dir)
            .with_output(OutputMode::Capture, OutputMode::Inherit)
            .with_echo(echo_commands);
        let result = self.executor.execute(&argv, &config).await?;
        Ok(result.stdout.trim().to_string())
    }
}
