//! In-memory filesystem tree representation.
//!
//! A [`Directory`] owns its subdirectories and [`File`]s keyed by name, so the
//! whole tree is a strict ownership hierarchy with no back-pointers. Nodes are
//! addressed by their full path and inserted or looked up relative to the
//! directory the call is made on.

mod descendants;
mod directory;
mod file;
mod scan;
mod traversal;

use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

pub use descendants::Descendants;
pub use directory::{Directory, TreeError};
pub use file::File;
pub use scan::{ScanError, get_directory_structure};

use crate::ext::CleanPathExt;

/// Cleans the parent path of a node. An empty path is the filesystem root.
fn parent_path(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        PathBuf::from(MAIN_SEPARATOR_STR)
    } else {
        path.clean()
    }
}
