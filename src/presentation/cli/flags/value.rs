/// Whether an option consumes a value from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The option stands alone: `-v`, `--verbose`, `--verbose=false`.
    NoArgument,

    /// The option consumes exactly one value, inline or detached.
    RequiresArgument,
}

/// Storage cell for one resolved flag value.
///
/// A cell is created at registration time with the flag's default and is
/// mutated at most once per parse, when [`Value::apply`] installs the raw
/// occurrences collected by the tokenizer. Both spellings of a flag refer
/// to the same cell, so a value set through `--verbose` is visible through
/// `-v` and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A flag that resolves to true or false.
    Boolean(bool),

    /// A flag that resolves to arbitrary text.
    Text(String),
}

impl Value {
    /// Tells the tokenizer whether this flag consumes a value.
    pub fn classification(&self) -> Classification {
        match self {
            Value::Boolean(_) => Classification::NoArgument,
            Value::Text(_) => Classification::RequiresArgument,
        }
    }

    /// Renders the current value as text for diagnostics and help.
    pub fn render(&self) -> String {
        match self {
            Value::Boolean(cell) => cell.to_string(),
            Value::Text(cell) => cell.clone(),
        }
    }

    /// Installs the resolved value from the raw occurrences collected for
    /// this flag. Every occurrence is evaluated in order, so the last one
    /// wins; an empty list keeps the default. Cannot fail: the tokenizer
    /// has already validated inline boolean values.
    pub fn apply(&mut self, occurrences: &[String]) {
        match self {
            Value::Boolean(cell) => {
                for occurrence in occurrences {
                    *cell = occurrence == "true";
                }
            }
            Value::Text(cell) => {
                for occurrence in occurrences {
                    occurrence.clone_into(cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            Value::Boolean(false).classification(),
            Classification::NoArgument
        );
        assert_eq!(
            Value::Text(String::new()).classification(),
            Classification::RequiresArgument
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Boolean(true).render(), "true");
        assert_eq!(Value::Boolean(false).render(), "false");
        assert_eq!(Value::Text("origin".to_string()).render(), "origin");
    }

    #[test]
    fn test_apply_boolean_last_occurrence_wins() {
        let mut value = Value::Boolean(false);
        value.apply(&["true".to_string(), "false".to_string(), "true".to_string()]);
        assert_eq!(value, Value::Boolean(true));

        let mut value = Value::Boolean(true);
        value.apply(&["true".to_string(), "false".to_string()]);
        assert_eq!(value, Value::Boolean(false));
    }

    #[test]
    fn test_apply_boolean_non_true_is_false() {
        let mut value = Value::Boolean(true);
        value.apply(&["yes".to_string()]);
        assert_eq!(value, Value::Boolean(false));
    }

    #[test]
    fn test_apply_text_last_occurrence_wins() {
        let mut value = Value::Text("default".to_string());
        value.apply(&["first".to_string(), "second".to_string()]);
        assert_eq!(value, Value::Text("second".to_string()));
    }

    #[test]
    fn test_apply_empty_keeps_default() {
        let mut value = Value::Boolean(true);
        value.apply(&[]);
        assert_eq!(value, Value::Boolean(true));

        let mut value = Value::Text("default".to_string());
        value.apply(&[]);
        assert_eq!(value, Value::Text("default".to_string()));
    }
}
