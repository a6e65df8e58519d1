use std::collections::HashMap;
use std::marker::PhantomData;

use super::getopt::{getopt_long, GetoptError, OptionSpec};
use super::value::Value;

/// Typed handle to a flag registered on a [`FlagSet`].
///
/// Handles are issued at registration time and read back after parsing;
/// they are only meaningful against the flag set that created them.
#[derive(Debug)]
pub struct FlagRef<T> {
    index: usize,
    _kind: PhantomData<T>,
}

// Handles are plain indices, copyable no matter what they resolve to.
impl<T> Clone for FlagRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FlagRef<T> {}

/// Per-registration documentation, used to render the flags section of a
/// command's help text.
#[derive(Debug, Clone)]
struct FlagDoc {
    long: String,
    short: Option<char>,
    usage: String,
}

/// A set of command-line flags for a single subcommand invocation.
///
/// Register flags first, then call [`FlagSet::parse`] exactly once, then
/// read the resolved values through the handles and
/// [`FlagSet::args`]. Each registered flag owns one storage cell; its long
/// and short spellings both point at that cell, so setting the value
/// through either spelling is visible through the other.
pub struct FlagSet {
    command_name: String,
    cells: Vec<Value>,
    names: HashMap<String, usize>,
    positional: Vec<String>,
    docs: Vec<FlagDoc>,
}

impl FlagSet {
    /// Creates an empty flag set. The command name is prepended to the
    /// argument vector at parse time and shows up in diagnostics.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            cells: Vec::new(),
            names: HashMap::new(),
            positional: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// Registers a boolean flag. Pass an empty `long` or `None` for
    /// `short` to skip that spelling. Must be called before
    /// [`FlagSet::parse`].
    pub fn bool_flag(
        &mut self,
        long: &str,
        short: Option<char>,
        default: bool,
        usage: &str,
    ) -> FlagRef<bool> {
        let index = self.install(Value::Boolean(default), long, short, usage);
        FlagRef {
            index,
            _kind: PhantomData,
        }
    }

    /// Registers a text flag that requires a value.
    pub fn text_flag(
        &mut self,
        long: &str,
        short: Option<char>,
        default: &str,
        usage: &str,
    ) -> FlagRef<String> {
        let index = self.install(Value::Text(default.to_string()), long, short, usage);
        FlagRef {
            index,
            _kind: PhantomData,
        }
    }

    fn install(&mut self, cell: Value, long: &str, short: Option<char>, usage: &str) -> usize {
        let index = self.cells.len();
        self.cells.push(cell);
        if !long.is_empty() {
            let previous = self.names.insert(long.to_string(), index);
            debug_assert!(previous.is_none(), "duplicate flag spelling: --{long}");
        }
        if let Some(short) = short {
            let previous = self.names.insert(short.to_string(), index);
            debug_assert!(previous.is_none(), "duplicate flag spelling: -{short}");
        }
        self.docs.push(FlagDoc {
            long: long.to_string(),
            short,
            usage: usage.to_string(),
        });
        index
    }

    /// Parses the subcommand's raw arguments.
    ///
    /// The stored command name is prepended to reconstruct a full argument
    /// vector for the tokenizer. The parse is all-or-nothing: on error the
    /// flag cells keep their defaults and the positional list stays empty.
    pub fn parse(&mut self, arguments: &[String]) -> Result<(), GetoptError> {
        let mut argv = Vec::with_capacity(arguments.len() + 1);
        argv.push(self.command_name.clone());
        argv.extend(arguments.iter().cloned());

        let spec = self.option_spec();
        let parsed = getopt_long(&spec, &argv)?;

        for (name, index) in &self.names {
            if let Some(occurrences) = parsed.options.get(name) {
                self.cells[*index].apply(occurrences);
            }
        }
        self.positional = parsed.positional;
        Ok(())
    }

    fn option_spec(&self) -> OptionSpec {
        self.names
            .iter()
            .map(|(name, index)| (name.clone(), self.cells[*index].classification()))
            .collect()
    }

    /// Positional arguments from the most recent successful parse.
    pub fn args(&self) -> &[String] {
        &self.positional
    }

    /// The command name this flag set was created with.
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Reads the resolved value of a boolean flag.
    pub fn bool_value(&self, flag: FlagRef<bool>) -> bool {
        match &self.cells[flag.index] {
            Value::Boolean(cell) => *cell,
            Value::Text(_) => unreachable!("boolean handle refers to a text cell"),
        }
    }

    /// Reads the resolved value of a text flag.
    pub fn text_value(&self, flag: FlagRef<String>) -> &str {
        match &self.cells[flag.index] {
            Value::Text(cell) => cell,
            Value::Boolean(_) => unreachable!("text handle refers to a boolean cell"),
        }
    }

    /// Renders the registered flags as help text lines, one per flag.
    pub fn flag_help(&self) -> String {
        let mut out = String::new();
        for doc in &self.docs {
            let spelling = match (doc.short, doc.long.as_str()) {
                (Some(short), "") => format!("-{short}"),
                (Some(short), long) => format!("-{short}, --{long}"),
                (None, long) => format!("    --{long}"),
            };
            out.push_str(&format!("  {spelling:<22}{}\n", doc.usage));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arguments(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn test_defaults_survive_an_empty_parse() {
        let mut flags = FlagSet::new("clone");
        let verbose = flags.bool_flag("verbose", Some('v'), false, "");
        let remote = flags.text_flag("remote", Some('r'), "origin", "");

        flags.parse(&[]).unwrap();

        assert!(!flags.bool_value(verbose));
        assert_eq!(flags.text_value(remote), "origin");
        assert!(flags.args().is_empty());
    }

    #[test]
    fn test_long_and_short_spellings_share_one_cell() {
        let mut flags = FlagSet::new("clone");
        let verbose = flags.bool_flag("verbose", Some('v'), false, "");
        flags.parse(&arguments(&["--verbose"])).unwrap();
        assert!(flags.bool_value(verbose));

        let mut flags = FlagSet::new("clone");
        let verbose = flags.bool_flag("verbose", Some('v'), false, "");
        flags.parse(&arguments(&["-v"])).unwrap();
        assert!(flags.bool_value(verbose));
    }

    #[test]
    fn test_text_flag_inline_and_detached() {
        let mut flags = FlagSet::new("cmd");
        let remote = flags.text_flag("remote", None, "", "");
        flags.parse(&arguments(&["--remote=upstream"])).unwrap();
        assert_eq!(flags.text_value(remote), "upstream");

        let mut flags = FlagSet::new("cmd");
        let remote = flags.text_flag("remote", None, "", "");
        flags.parse(&arguments(&["--remote", "upstream"])).unwrap();
        assert_eq!(flags.text_value(remote), "upstream");
    }

    #[test]
    fn test_cluster_decomposition() {
        let mut flags = FlagSet::new("cmd");
        let a = flags.bool_flag("", Some('a'), false, "");
        let b = flags.bool_flag("", Some('b'), false, "");
        let c = flags.text_flag("", Some('c'), "", "");

        flags.parse(&arguments(&["-abc", "X"])).unwrap();

        assert!(flags.bool_value(a));
        assert!(flags.bool_value(b));
        assert_eq!(flags.text_value(c), "X");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let mut flags = FlagSet::new("cmd");
        let verbose = flags.bool_flag("verbose", None, false, "");
        flags
            .parse(&arguments(&["--verbose", "--verbose=false"]))
            .unwrap();
        assert!(!flags.bool_value(verbose));
    }

    #[test]
    fn test_positional_arguments_keep_their_order() {
        let mut flags = FlagSet::new("foreach");
        let _keep_going = flags.bool_flag("keep-going", Some('k'), false, "");
        flags
            .parse(&arguments(&["-k", "git", "status", "--short"]))
            .unwrap();
        assert_eq!(flags.args(), arguments(&["git", "status", "--short"]));
    }

    #[test]
    fn test_parse_error_is_forwarded_and_nothing_is_mutated() {
        let mut flags = FlagSet::new("cmd");
        let verbose = flags.bool_flag("verbose", None, true, "");

        let result = flags.parse(&arguments(&["--verbose=false", "--bogus"]));

        assert_eq!(result, Err(GetoptError::UnknownOption("bogus".to_string())));
        assert!(flags.bool_value(verbose), "cell must keep its default");
        assert!(flags.args().is_empty());
    }

    #[test]
    fn test_flag_help_lists_registered_flags() {
        let mut flags = FlagSet::new("clone");
        flags.bool_flag("verbose", Some('v'), false, "Show the output of git clone.");
        flags.bool_flag("print-commands", Some('x'), false, "Log the commands we execute.");

        let help = flags.flag_help();
        assert!(help.contains("-v, --verbose"));
        assert!(help.contains("-x, --print-commands"));
        assert!(help.contains("Show the output of git clone."));
    }
}
