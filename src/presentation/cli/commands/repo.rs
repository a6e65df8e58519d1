use async_trait::async_trait;

use crate::application::use_cases::add_repository::{AddRepositoryConfig, AddRepositoryUseCase};
use crate::application::use_cases::list_repositories::{
    ListRepositoriesConfig, ListRepositoriesUseCase,
};
use crate::application::use_cases::remove_repository::{
    RemoveRepositoryConfig, RemoveRepositoryUseCase,
};
use crate::presentation::cli::commands::{
    contains_help, print_command_help, report_error, report_usage_error, CliCommand,
};
use crate::presentation::cli::flags::FlagSet;

/// The `repo` command: a dispatcher over the index-editing subcommands.
pub struct RepoCommand;

#[async_trait]
impl CliCommand for RepoCommand {
    fn description(&self) -> &'static str {
        "Add/remove repositories from the multirepo index."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        if argv.is_empty() || argv[0] == "-h" || argv[0] == "--help" {
            self.print_help();
            return Ok(());
        }

        let (name, rest) = (&argv[0], &argv[1..]);
        match name.as_str() {
            "add" => RepoAddCommand.run(rest).await,
            "ls" => RepoLsCommand.run(rest).await,
            "rm" => RepoRmCommand.run(rest).await,
            other => {
                eprintln!("multirepo repo: command \"{other}\" not found");
                eprintln!("Try `multirepo repo --help` for help.");
                Err(anyhow::anyhow!("multirepo repo: command not found"))
            }
        }
    }
}

impl RepoCommand {
    fn print_help(&self) {
        println!();
        println!("repo - {}", self.description());
        println!();
        println!("usage: multirepo repo {{add|ls|rm}} [args...]");
        println!();
        println!("commands:");
        println!();
        println!("\t{:<10}\t{}", "add", RepoAddCommand.description());
        println!("\t{:<10}\t{}", "ls", RepoLsCommand.description());
        println!("\t{:<10}\t{}", "rm", RepoRmCommand.description());
        println!();
        println!("Use `multirepo repo {{command}} --help` for help on `{{command}}`.");
        println!();
    }
}

/// The `repo add` subcommand.
struct RepoAddCommand;

#[async_trait]
impl CliCommand for RepoAddCommand {
    fn description(&self) -> &'static str {
        "Add an existing repository to the multirepo index."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo repo add");
        let print_commands = flags.bool_flag(
            "print-commands",
            Some('x'),
            false,
            "Log the commands we execute.",
        );

        if contains_help(argv) {
            print_command_help(
                "repo add",
                self.description(),
                "multirepo repo add [-x] <repo>...",
                &flags,
                "This command records already-cloned repositories in the index,\n\
                 reading each URL from the repository's origin remote.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("repo add", error));
        }
        if flags.args().is_empty() {
            return Err(report_usage_error(
                "repo add",
                "expected at least one repository",
            ));
        }

        let config = AddRepositoryConfig::new(".", flags.args().to_vec())
            .with_print_commands(flags.bool_value(print_commands));
        AddRepositoryUseCase::new(config)
            .execute()
            .await
            .map_err(|error| report_error("repo add", error))
    }
}

/// The `repo ls` subcommand.
struct RepoLsCommand;

#[async_trait]
impl CliCommand for RepoLsCommand {
    fn description(&self) -> &'static str {
        "List the repositories in the multirepo index."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo repo ls");

        if contains_help(argv) {
            print_command_help(
                "repo ls",
                self.description(),
                "multirepo repo ls",
                &flags,
                "This command prints the index entries, sorted by name.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("repo ls", error));
        }
        if !flags.args().is_empty() {
            return Err(report_usage_error(
                "repo ls",
                "unexpected positional arguments",
            ));
        }

        let listing = ListRepositoriesUseCase::new(ListRepositoriesConfig::new("."))
            .execute()
            .await
            .map_err(|error| report_error("repo ls", error))?;
        for entry in &listing {
            println!("{:<24} {}", entry.name, entry.url);
        }
        Ok(())
    }
}

/// The `repo rm` subcommand.
struct RepoRmCommand;

#[async_trait]
impl CliCommand for RepoRmCommand {
    fn description(&self) -> &'static str {
        "Remove a repository from the multirepo index."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo repo rm");

        if contains_help(argv) {
            print_command_help(
                "repo rm",
                self.description(),
                "multirepo repo rm <repo>",
                &flags,
                "This command removes an entry from the index. The repository's\n\
                 working tree is left in place.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("repo rm", error));
        }
        let args = flags.args();
        if args.len() != 1 {
            return Err(report_usage_error(
                "repo rm",
                "expected exactly one repository",
            ));
        }

        RemoveRepositoryUseCase::new(RemoveRepositoryConfig::new(".", args[0].as_str()))
            .execute()
            .await
            .map_err(|error| report_error("repo rm", error))
    }
}
