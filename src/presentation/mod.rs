//! Presentation: the command-line interface.

pub mod cli;
