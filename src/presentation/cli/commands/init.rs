use async_trait::async_trait;

use crate::application::use_cases::init_workspace::{InitWorkspaceConfig, InitWorkspaceUseCase};
use crate::presentation::cli::commands::{
    contains_help, print_command_help, report_error, report_usage_error, CliCommand,
};
use crate::presentation::cli::flags::FlagSet;

/// The `init` command.
pub struct InitCommand;

#[async_trait]
impl CliCommand for InitCommand {
    fn description(&self) -> &'static str {
        "Initialize a multirepo workspace."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo init");
        let print_commands = flags.bool_flag(
            "print-commands",
            Some('x'),
            false,
            "Log the commands we execute.",
        );

        if contains_help(argv) {
            print_command_help(
                "init",
                self.description(),
                "multirepo init [-x]",
                &flags,
                "This command creates the `.multirepo` directory and an empty\n\
                 repository index. An existing index is left untouched.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("init", error));
        }
        if !flags.args().is_empty() {
            return Err(report_usage_error("init", "unexpected positional arguments"));
        }

        let config = InitWorkspaceConfig::new(".")
            .with_print_commands(flags.bool_value(print_commands));
        InitWorkspaceUseCase::new(config)
            .execute()
            .await
            .map_err(|error| report_error("init", error))
    }
}
