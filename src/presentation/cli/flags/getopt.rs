use std::collections::HashMap;

use thiserror::Error;

use super::value::Classification;

/// Errors produced while tokenizing a command line.
///
/// Match on the kind, not the message: the CLI layer turns these into
/// usage diagnostics without inspecting the text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GetoptError {
    /// The argument vector was empty, so there was no `argv[0]`.
    #[error("missing program name")]
    MissingProgramName,

    /// An option name, long or short, is not in the specification.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A value-taking option reached the end of the input with no value.
    #[error("option requires a value: {0}")]
    OptionRequiresValue(String),

    /// A boolean long option received an inline value other than empty,
    /// `true`, or `false`.
    #[error("invalid option value for option {name}: {value}")]
    InvalidOptionValue {
        /// The offending option name.
        name: String,
        /// The rejected inline value.
        value: String,
    },
}

/// Maps an option name, long or single-character, to its classification.
pub type OptionSpec = HashMap<String, Classification>;

/// The result of tokenizing an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgv {
    /// The program or subcommand name taken from `argv[0]`.
    pub command: String,

    /// Raw occurrences per option name, in the order they were seen.
    /// Repeated flags are legal and every occurrence is retained.
    pub options: HashMap<String, Vec<String>>,

    /// Positional arguments, in their original order.
    pub positional: Vec<String>,
}

impl ParsedArgv {
    fn record(&mut self, name: &str, value: &str) {
        self.options
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
}

/// Tokenizes `argv` according to `spec` using GNU getopt-long rules.
///
/// One left-to-right pass with no backtracking and, deliberately, no
/// permutation: the first token that does not start with `-` ends option
/// scanning, and it and everything after it stay positional in their
/// original order. This way `multirepo foreach git log --oneline` hands
/// `--oneline` to `git log` rather than rejecting it. The `--` terminator
/// ends option scanning unconditionally.
pub fn getopt_long(spec: &OptionSpec, argv: &[String]) -> Result<ParsedArgv, GetoptError> {
    let (command, mut rest) = argv
        .split_first()
        .ok_or(GetoptError::MissingProgramName)?;
    let mut result = ParsedArgv {
        command: command.clone(),
        ..ParsedArgv::default()
    };

    while let Some(current) = rest.first() {
        if current == "--" {
            rest = &rest[1..];
            break;
        }
        if !current.starts_with('-') {
            break;
        }
        rest = &rest[1..];

        let body = &current[1..];
        rest = match body.strip_prefix('-') {
            Some(long) => parse_long_option(spec, rest, &mut result, long)?,
            None => parse_short_cluster(spec, rest, &mut result, body)?,
        };
    }

    result.positional.extend(rest.iter().cloned());
    Ok(result)
}

/// Parses a single `--name[=value]` token, consuming the next argument
/// vector element when a required value was not attached inline.
fn parse_long_option<'a>(
    spec: &OptionSpec,
    rest: &'a [String],
    result: &mut ParsedArgv,
    body: &str,
) -> Result<&'a [String], GetoptError> {
    // A leading `=` belongs to the name, not to an empty name's value.
    let (name, inline) = match body.find('=') {
        Some(index) if index > 0 => (&body[..index], &body[index + 1..]),
        _ => (body, ""),
    };

    match spec.get(name) {
        Some(Classification::NoArgument) => match inline {
            "" | "true" => {
                result.record(name, "true");
                Ok(rest)
            }
            "false" => {
                result.record(name, "false");
                Ok(rest)
            }
            value => Err(GetoptError::InvalidOptionValue {
                name: name.to_string(),
                value: value.to_string(),
            }),
        },

        Some(Classification::RequiresArgument) => {
            if !inline.is_empty() {
                result.record(name, inline);
                return Ok(rest);
            }
            let (value, remaining) = rest
                .split_first()
                .ok_or_else(|| GetoptError::OptionRequiresValue(name.to_string()))?;
            result.record(name, value);
            Ok(remaining)
        }

        None => Err(GetoptError::UnknownOption(name.to_string())),
    }
}

/// Parses a `-abc` cluster character by character. A value-taking option
/// ends the cluster: the remaining characters, if any, are its value,
/// otherwise the next argument vector element is consumed.
fn parse_short_cluster<'a>(
    spec: &OptionSpec,
    rest: &'a [String],
    result: &mut ParsedArgv,
    cluster: &str,
) -> Result<&'a [String], GetoptError> {
    for (index, character) in cluster.char_indices() {
        let name = character.to_string();
        match spec.get(&name) {
            Some(Classification::NoArgument) => {
                result.record(&name, "true");
            }

            Some(Classification::RequiresArgument) => {
                let remainder = &cluster[index + character.len_utf8()..];
                if !remainder.is_empty() {
                    result.record(&name, remainder);
                    return Ok(rest);
                }
                let (value, remaining) = rest
                    .split_first()
                    .ok_or(GetoptError::OptionRequiresValue(name.clone()))?;
                result.record(&name, value);
                return Ok(remaining);
            }

            None => return Err(GetoptError::UnknownOption(name)),
        }
    }
    Ok(rest)
}
