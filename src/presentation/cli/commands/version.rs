use async_trait::async_trait;

use crate::presentation::cli::commands::{
    contains_help, print_command_help, report_usage_error, CliCommand,
};
use crate::presentation::cli::flags::FlagSet;

/// The `version` command.
pub struct VersionCommand;

#[async_trait]
impl CliCommand for VersionCommand {
    fn description(&self) -> &'static str {
        "Print the tool version."
    }

    async fn run(&self, argv: &[String]) -> anyhow::Result<()> {
        let mut flags = FlagSet::new("multirepo version");

        if contains_help(argv) {
            print_command_help(
                "version",
                self.description(),
                "multirepo version",
                &flags,
                "This command prints the version and build metadata.",
            );
            return Ok(());
        }

        if let Err(error) = flags.parse(argv) {
            return Err(report_usage_error("version", error));
        }
        if !flags.args().is_empty() {
            return Err(report_usage_error(
                "version",
                "unexpected positional arguments",
            ));
        }

        println!(
            "multirepo {} ({}, built {})",
            env!("CARGO_PKG_VERSION"),
            env!("GIT_HASH"),
            env!("BUILD_DATE"),
        );
        Ok(())
    }
}
