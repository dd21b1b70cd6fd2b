use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ext::CleanPathExt;

/// A file leaf in a [`Directory`](super::Directory) tree.
///
/// Only the name and the location are tracked, never the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    name: OsString,
    path: PathBuf,
}

impl File {
    /// Creates a file named `name` whose parent directory is `path`.
    /// An empty `path` stands for the filesystem root.
    pub fn new(name: impl Into<OsString>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            path: super::parent_path(path.as_ref()),
        }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Path of the parent directory, not including the file itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.name).clean()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path().display())
    }
}
