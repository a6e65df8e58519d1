//! The command-line interface: flag parsing, the dispatch table, and the
//! subcommand implementations.

pub mod commands;
pub mod flags;

use std::collections::BTreeMap;

use commands::{
    clone::CloneCommand, foreach::ForeachCommand, init::InitCommand, repo::RepoCommand,
    version::VersionCommand, CliCommand,
};

/// The command-line application: the dispatch table and top-level help.
pub struct CliApp {
    commands: BTreeMap<&'static str, Box<dyn CliCommand>>,
}

impl Default for CliApp {
    fn default() -> Self {
        let mut commands: BTreeMap<&'static str, Box<dyn CliCommand>> = BTreeMap::new();
        commands.insert("clone", Box::new(CloneCommand));
        commands.insert("foreach", Box::new(ForeachCommand));
        commands.insert("init", Box::new(InitCommand));
        commands.insert("repo", Box::new(RepoCommand));
        commands.insert("version", Box::new(VersionCommand));
        Self { commands }
    }
}

impl CliApp {
    /// Creates the application with the full command table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs with the process arguments. By the time this returns an
    /// error, the diagnostics have already been printed; the caller only
    /// maps the error to the exit code.
    pub async fn run(&self) -> anyhow::Result<()> {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        self.dispatch(&argv).await
    }

    /// Dispatches an argument vector to the selected command.
    pub async fn dispatch(&self, argv: &[String]) -> anyhow::Result<()> {
        if argv.is_empty() || argv[0] == "-h" || argv[0] == "--help" {
            self.print_help();
            return Ok(());
        }

        let (name, rest) = (&argv[0], &argv[1..]);
        match self.commands.get(name.as_str()) {
            Some(command) => command.run(rest).await,
            None => {
                eprintln!("multirepo: command \"{name}\" not found");
                eprintln!("Try `multirepo --help` for help.");
                Err(anyhow::anyhow!("multirepo: command not found"))
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("multirepo - manage multiple git repositories as a monorepo.");
        println!();
        println!("usage: multirepo {{command}} [args...]");
        println!();
        println!("commands:");
        println!();
        for (name, command) in &self.commands {
            println!("\t{name:<10}\t{}", command.description());
        }
        println!();
        println!("Use `multirepo {{command}} --help` for help on `{{command}}`.");
        println!();
    }
}
