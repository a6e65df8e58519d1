//! # multirepo - manage multiple git repositories as a monorepo
//!
//! `multirepo` keeps a JSON index of git repositories under a
//! `.multirepo` control directory and delegates every real repository
//! operation to external `git` invocations: `clone` clones and records,
//! `foreach` runs a command in each indexed repository, and the `repo`
//! subcommands edit the index.
//!
//! ## Quick start
//!
//! ```bash
//! multirepo init
//! multirepo clone git@github.com:user/repo
//! multirepo foreach git status --short
//! multirepo repo ls
//! ```
//!
//! ## Architecture
//!
//! The crate follows a layered layout:
//!
//! - [`domain`]: the repository index and the value objects around it
//! - [`application`]: one use case per subcommand
//! - [`infrastructure`]: file system, locking, and subprocess plumbing
//! - [`presentation`]: the CLI, including its own getopt-long flag
//!   engine in [`presentation::cli::flags`]
//! - [`common`]: shared error handling
//!
//! ## Flag parsing
//!
//! Subcommand options are parsed by an in-tree GNU getopt-long engine
//! rather than a CLI framework. The engine deliberately never permutes
//! arguments: the first positional token ends option scanning, which is
//! what lets `multirepo foreach git log --oneline` hand `--oneline` to
//! git untouched. See [`presentation::cli::flags`] for the details.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::common::error::MultirepoError;
pub use crate::common::result::MultirepoResult as Result;
