use async_trait::async_trait;

use crate::application::use_cases::foreach_command::{ForeachCommandConfig, ForeachCommandUseCase};
use crate::presentation::cli::commands::{
    contains_help, print_command_help, report_error, report_usage_error, CliCommand,
};
use crate::presentation::cli::flags::FlagSet;

/// The `foreach` command.
pub struct ForeachCommand;

#[async_trait]
impl CliCommand for ForeachCommand {
    fn description(&self) -> &'static str {
        "Execute a command in each repository."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo foreach");
        let keep_going = flags.bool_flag(
            "keep-going",
            Some('k'),
            false,
            "Continue iterating even if the command fails.",
        );
        let print_commands = flags.bool_flag(
            "print-commands",
            Some('x'),
            false,
            "Log the commands we execute.",
        );

        if contains_help(argv) {
            print_command_help(
                "foreach",
                self.description(),
                "multirepo foreach [-kx] command [args...]",
                &flags,
                "This command runs the given command in each indexed repository.\n\
                 Flags are not permuted: everything after the command name is\n\
                 passed through verbatim, including `-`-prefixed arguments.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("foreach", error));
        }
        if flags.args().is_empty() {
            return Err(report_usage_error(
                "foreach",
                "expected at least the command name",
            ));
        }

        let config = ForeachCommandConfig::new(".", flags.args().to_vec())
            .with_keep_going(flags.bool_value(keep_going))
            .with_print_commands(flags.bool_value(print_commands));
        let result = ForeachCommandUseCase::new(config)
            .execute()
            .await
            .map_err(|error| report_error("foreach", error))?;

        for failure in &result.failures {
            eprintln!("multirepo foreach: {}: {}", failure.repo, failure.error);
        }
        if !result.success() {
            return Err(anyhow::anyhow!(
                "multirepo foreach: {} repositories failed",
                result.failures.len()
            ));
        }
        Ok(())
    }
}
