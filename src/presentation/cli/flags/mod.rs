//! Command-line option parsing for subcommands.
//!
//! The API mimics a conventional flag package but the tokenizer speaks
//! GNU getopt-long: long options with inline (`--name=value`) or detached
//! (`--name value`) values, boolean long options accepting `--name`,
//! `--name=true`, and `--name=false`, and short options that may be
//! clustered (`-abc`).
//!
//! Options are never permuted. The first positional token ends option
//! scanning and everything after it passes through untouched, so
//! `foreach git log --oneline` delivers `--oneline` to git instead of
//! rejecting it. The `--` separator ends option scanning unconditionally.

mod flag_set;
mod getopt;
mod value;

pub use flag_set::{FlagRef, FlagSet};
pub use getopt::{getopt_long, GetoptError, OptionSpec, ParsedArgv};
pub use value::{Classification, Value};
