//! Application use cases, one per subcommand.

pub mod use_cases;
