use std::path::{Path, PathBuf};

/// The `.multirepo` control directory at the workspace root.
///
/// Everything this tool persists lives inside it: the repository index
/// and the lock file serializing access to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotDir {
    root: PathBuf,
}

impl DotDir {
    /// Name of the control directory.
    pub const DIR_NAME: &'static str = ".multirepo";

    /// The control directory of the workspace rooted at `workspace_root`.
    pub fn at(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            root: workspace_root.into().join(Self::DIR_NAME),
        }
    }

    /// The control directory of the workspace rooted at the current
    /// working directory.
    pub fn default_location() -> Self {
        Self {
            root: PathBuf::from(Self::DIR_NAME),
        }
    }

    /// The directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of the JSON repository index.
    pub fn index_file_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Path of the lock file serializing workspace mutation.
    pub fn lock_file_path(&self) -> PathBuf {
        self.root.join("lock")
    }
}
