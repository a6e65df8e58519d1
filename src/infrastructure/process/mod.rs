//! Subprocess execution.

pub mod command_executor;

pub use command_executor::{
    echo_command, render_command_line, CommandExecutor, ExecutionConfig, ExecutionResult,
    OutputMode,
};
