use async_trait::async_trait;

use crate::application::use_cases::clone_repository::{
    CloneRepositoryConfig, CloneRepositoryUseCase,
};
use crate::presentation::cli::commands::{
    contains_help, print_command_help, report_error, report_usage_error, CliCommand,
};
use crate::presentation::cli::flags::FlagSet;

/// The `clone` command.
pub struct CloneCommand;

#[async_trait]
impl CliCommand for CloneCommand {
    fn description(&self) -> &'static str {
        "Clone a repository into the multirepo."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo clone");
        let verbose = flags.bool_flag(
            "verbose",
            Some('v'),
            false,
            "Show the output of git clone.",
        );
        let print_commands = flags.bool_flag(
            "print-commands",
            Some('x'),
            false,
            "Log the commands we execute.",
        );

        if contains_help(argv) {
            print_command_help(
                "clone",
                self.description(),
                "multirepo clone [-vx] git@github.com:user/repo",
                &flags,
                "This command clones the given repository under the workspace\n\
                 root and records it in the multirepo index.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("clone", error));
        }
        let args = flags.args();
        if args.len() != 1 {
            return Err(report_usage_error("clone", "expected exactly one repository"));
        }

        let config = CloneRepositoryConfig::new(".", args[0].as_str())
            .with_verbose(flags.bool_value(verbose))
            .with_print_commands(flags.bool_value(print_commands));
        CloneRepositoryUseCase::new(config)
            .execute()
            .await
            .map_err(|error| report_error("clone", error))
    }
}
