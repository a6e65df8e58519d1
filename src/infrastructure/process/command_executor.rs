use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use colored::Colorize;
use tokio::process::Command;
use tracing::debug;

use crate::common::error::MultirepoError;
use crate::common::result::MultirepoResult;

/// How a subprocess stream is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture the stream for the caller.
    Capture,
    /// Pass the stream through to the user's terminal.
    Inherit,
    /// Discard the stream.
    Discard,
}

impl OutputMode {
    fn stdio(self) -> Stdio {
        match self {
            OutputMode::Capture => Stdio::piped(),
            OutputMode::Inherit => Stdio::inherit(),
            OutputMode::Discard => Stdio::null(),
        }
    }
}

/// Configuration for a single subprocess run.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Working directory; inherited when absent.
    pub working_directory: Option<PathBuf>,

    /// Extra environment variables layered over the inherited ones.
    pub environment_variables: HashMap<String, String>,

    /// Standard output wiring.
    pub stdout: OutputMode,

    /// Standard error wiring.
    pub stderr: OutputMode,

    /// Echo the command line to stderr before running, `sh -x` style.
    pub echo_commands: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            working_directory: None,
            environment_variables: HashMap::new(),
            stdout: OutputMode::Discard,
            stderr: OutputMode::Discard,
            echo_commands: false,
        }
    }
}

impl ExecutionConfig {
    /// Creates a config with all streams discarded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory.
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// Adds one environment variable.
    pub fn with_environment_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(key.into(), value.into());
        self
    }

    /// Sets the stream wiring.
    pub fn with_output(mut self, stdout: OutputMode, stderr: OutputMode) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    /// Enables or disables command echoing.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }
}

/// Result of a successful subprocess run.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code (zero here, since non-zero exits become errors).
    pub exit_code: i32,

    /// Captured standard output; empty unless captured.
    pub stdout: String,

    /// Captured standard error; empty unless captured.
    pub stderr: String,
}

/// Runs external commands through `tokio::process`.
///
/// A non-zero exit status is reported as an error carrying the rendered
/// command line and the exit code, so callers can simply propagate it.
#[derive(Debug, Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    /// Creates a new executor.
    pub fn new() -> Self {
        Self
    }

    /// Runs `argv` to completion. Standard input is always closed.
    pub async fn execute(
        &self,
        argv: &[String],
        config: &ExecutionConfig,
    ) -> MultirepoResult<ExecutionResult> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| MultirepoError::command_error("empty command line", "", None))?;
        let rendered = render_command_line(argv, config.working_directory.as_deref());

        if config.echo_commands {
            echo_command(&rendered);
        }

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(config.stdout.stdio())
            .stderr(config.stderr.stdio());
        if let Some(dir) = &config.working_directory {
            command.current_dir(dir);
        }
        for (key, value) in &config.environment_variables {
            command.env(key, value);
        }

        debug!(command = %rendered, "running subprocess");
        let output = command.output().await.map_err(|source| {
            MultirepoError::command_error_with_source("cannot run command", rendered.clone(), source)
        })?;

        let exit_code = output.status.code().unwrap_or(-1);
        if !output.status.success() {
            return Err(MultirepoError::command_error(
                "command failed",
                rendered,
                Some(exit_code),
            ));
        }

        Ok(ExecutionResult {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Renders `argv` shell-quoted, wrapped in `(cd DIR && ...)` when it runs
/// in another directory, matching what a user would type to reproduce it.
pub fn render_command_line(argv: &[String], working_directory: Option<&Path>) -> String {
    let joined = shlex::try_join(argv.iter().map(String::as_str))
        .unwrap_or_else(|_| argv.join(" "));
    match working_directory {
        Some(dir) => {
            let dir = dir.display().to_string();
            let quoted = shlex::try_quote(&dir).map(|q| q.into_owned()).unwrap_or(dir);
            format!("(cd {quoted} && {joined})")
        }
        None => joined,
    }
}

/// Prints an executed command to stderr, highlighted so it stands out
/// when skimming terminal output.
pub fn echo_command(line: &str) {
    eprintln!("{}", format!("+ {line}").blue().bold());
}
