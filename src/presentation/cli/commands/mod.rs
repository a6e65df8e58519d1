//! Subcommand implementations.
//!
//! Every command parses its own arguments with [`FlagSet`], prints its
//! own diagnostics to stderr, and returns an error only after reporting
//! it; the application layer just maps that to the exit code.

pub mod clone;
pub mod foreach;
pub mod init;
pub mod repo;
pub mod version;

use async_trait::async_trait;

use crate::presentation::cli::flags::FlagSet;

/// A subcommand reachable from a dispatch table.
#[async_trait]
pub trait CliCommand: Send + Sync {
    /// One-line description shown by the parent command's help.
    fn description(&self) -> &'static str;

    /// Runs the command with its raw arguments, the subcommand name
    /// excluded.
    async fn run(&self, argv: &[String]) -> anyhow::Result<()>;
}

/// Whether the arguments ask for help. Checked before flag parsing so an
/// unknown-flag error never shadows `--help`.
pub fn contains_help(argv: &[String]) -> bool {
    argv.iter().any(|arg| arg == "-h" || arg == "--help")
}

/// Prints a command's help message in the house format.
pub fn print_command_help(name: &str, description: &str, usage: &str, flags: &FlagSet, body: &str) {
    println!();
    println!("{name} - {description}");
    println!();
    println!("usage: {usage}");
    let flag_help = flags.flag_help();
    if !flag_help.is_empty() {
        println!();
        println!("Flags:");
        print!("{flag_help}");
    }
    println!();
    println!("{body}");
    println!();
}

/// Reports a bad invocation: the error itself, then a pointer at the
/// command's help. The returned error carries no new information; the
/// diagnostics have already been printed.
pub fn report_usage_error(command: &str, error: impl std::fmt::Display) -> anyhow::Error {
    eprintln!("multirepo {command}: {error}");
    eprintln!("Try `multirepo {command} --help` for help.");
    anyhow::anyhow!("multirepo {command}: invalid invocation")
}

/// Reports a runtime failure, without the help hint.
pub fn report_error(command: &str, error: impl std::fmt::Display) -> anyhow::Error {
    eprintln!("multirepo {command}: {error}");
    anyhow::anyhow!("multirepo {command} failed")
}
