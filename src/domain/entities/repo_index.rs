use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single indexed repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// URL the repository was cloned from, in the form git understands.
    pub url: String,
}

/// The workspace's repository index, persisted as JSON inside the
/// control directory.
///
/// Keys are repository directory names relative to the workspace root.
/// The map is ordered by name so listing and iteration are deterministic.
/// An index file containing just `{}` deserializes to an empty index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIndex {
    #[serde(default)]
    repos: BTreeMap<String, RepoEntry>,
}

impl RepoIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a repository entry.
    pub fn add_repo(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.repos.insert(name.into(), RepoEntry { url: url.into() });
    }

    /// Removes a repository entry. Removing an unknown name is a no-op.
    pub fn remove_repo(&mut self, name: &str) {
        self.repos.remove(name);
    }

    /// Looks up a repository entry by name.
    pub fn get(&self, name: &str) -> Option<&RepoEntry> {
        self.repos.get(name)
    }

    /// Iterates over entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RepoEntry)> {
        self.repos.iter()
    }

    /// Number of indexed repositories.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
