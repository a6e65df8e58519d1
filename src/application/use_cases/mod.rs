//! Use case implementations. Each takes a `Config`, acquires the
//! workspace lock, performs one read-modify-write cycle on the index or
//! one batch of subprocess runs, and leaves presentation to the CLI.

pub mod add_repository;
pub mod clone_repository;
pub mod foreach_command;
pub mod init_workspace;
pub mod list_repositories;
pub mod remove_repository;
