use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Components, Path, PathBuf};

use snafu::{OptionExt, Snafu, ensure};
use tracing::trace;

use super::File;
use crate::ext::CleanPathExt;

/// A directory node owning its subdirectories and files.
///
/// `path` is the location of the parent, so the directory's own location is
/// [`Directory::full_path`]. Every immediate child's `path` equals the full path
/// of the directory holding it.
///
/// Children are stored in maps keyed by name. Names are kept as `OsString`, so
/// entries whose names are not valid UTF-8 stay distinct. Adding a child under
/// a name that is already taken replaces the previous entry, along with any
/// subtree it held.
#[derive(Debug, Clone)]
pub struct Directory {
    pub(super) name: OsString,
    pub(super) path: PathBuf,
    pub(super) sub_directories: HashMap<OsString, Directory>,
    pub(super) files: HashMap<OsString, File>,
}

impl Directory {
    /// Creates an empty directory named `name` whose parent is `path`.
    /// An empty `path` stands for the filesystem root.
    pub fn new(name: impl Into<OsString>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            path: super::parent_path(path.as_ref()),
            sub_directories: HashMap::new(),
            files: HashMap::new(),
        }
    }

    /// Creates an empty directory located at `full_path`.
    pub fn from_full_path(full_path: impl AsRef<Path>) -> Self {
        let full_path = full_path.as_ref().clean();
        match (full_path.parent(), full_path.file_name()) {
            (Some(parent), Some(name)) => Self::new(name, parent),
            _ => Self::new("", full_path),
        }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Path of the parent directory, not including this directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.name).clean()
    }

    pub fn sub_directories(&self) -> &HashMap<OsString, Directory> {
        &self.sub_directories
    }

    pub fn files(&self) -> &HashMap<OsString, File> {
        &self.files
    }

    pub fn sub_directory(&self, name: &str) -> Option<&Directory> {
        self.sub_directories.get(OsStr::new(name))
    }

    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.get(OsStr::new(name))
    }

    /// Compares name and location only. Children are not looked at, use
    /// [`Directory::structure_equals`] for that.
    pub fn equals(&self, other: &Directory) -> bool {
        self.full_path() == other.full_path() && self.name == other.name
    }

    /// Deep comparison of the whole subtree, independent of insertion order.
    pub fn structure_equals(&self, other: &Directory) -> bool {
        self.equals(other)
            && self.sub_directories.len() == other.sub_directories.len()
            && self.files.len() == other.files.len()
            && self.files.iter().all(|(name, file)| {
                other
                    .files
                    .get(name)
                    .is_some_and(|other_file| other_file == file)
            })
            && self.sub_directories.iter().all(|(name, directory)| {
                other
                    .sub_directories
                    .get(name)
                    .is_some_and(|other_directory| directory.structure_equals(other_directory))
            })
    }

    /// Whether `full_path` lies strictly below this directory.
    ///
    /// Paths are compared segment by segment after cleaning, so `/tmp/dir1x`
    /// is not below `/tmp/dir1` and a directory is never below itself.
    pub fn is_sub_path(&self, full_path: impl AsRef<Path>) -> bool {
        full_path
            .as_ref()
            .clean()
            .strip_prefix(self.full_path())
            .is_ok_and(|relative| relative.components().next().is_some())
    }

    /// Adds a directory at `full_path`, creating any missing directory in between.
    ///
    /// Existing intermediate directories are reused. A directory already present
    /// at `full_path` is replaced by the new, empty one.
    pub fn add_directory(
        &mut self,
        full_path: impl AsRef<Path>,
    ) -> Result<&mut Directory, TreeError> {
        let full_path = full_path.as_ref().clean();
        let (segments, name) = self.split_below(&full_path)?;
        trace!("Adding directory {}", full_path.display());

        let parent = self.create_path(&segments);
        let directory = Directory::new(name.clone(), parent.full_path());
        Ok(parent
            .sub_directories
            .entry(name)
            .insert_entry(directory)
            .into_mut())
    }

    /// Adds a file at `full_path`, creating any missing directory in between.
    /// A file already present at `full_path` is replaced.
    pub fn add_file(&mut self, full_path: impl AsRef<Path>) -> Result<&File, TreeError> {
        let full_path = full_path.as_ref().clean();
        let (segments, name) = self.split_below(&full_path)?;
        trace!("Adding file {}", full_path.display());

        let parent = self.create_path(&segments);
        let file = File::new(name.clone(), parent.full_path());
        Ok(parent.files.entry(name).insert_entry(file).into_mut())
    }

    /// Looks up the directory located exactly at `full_path`.
    pub fn get_directory(&self, full_path: impl AsRef<Path>) -> Result<&Directory, TreeError> {
        let full_path = full_path.as_ref().clean();
        let mut components = self.components_below(&full_path)?;

        let mut current = self;
        while let Some(component) = components.next() {
            current = current
                .sub_directories
                .get(component.as_os_str())
                .with_context(|| NotFoundSnafu {
                    directory: current.full_path(),
                    target: remaining_target(component, &components),
                })?;
        }
        Ok(current)
    }

    /// Same lookup as [`Directory::get_directory`], handing out a mutable reference.
    pub fn get_directory_mut(
        &mut self,
        full_path: impl AsRef<Path>,
    ) -> Result<&mut Directory, TreeError> {
        let full_path = full_path.as_ref().clean();
        let mut components = self.components_below(&full_path)?;

        let mut current = self;
        while let Some(component) = components.next() {
            let searched = current.full_path();
            current = current
                .sub_directories
                .get_mut(component.as_os_str())
                .with_context(|| NotFoundSnafu {
                    directory: searched,
                    target: remaining_target(component, &components),
                })?;
        }
        Ok(current)
    }

    /// Looks up the file located exactly at `full_path`.
    pub fn get_file(&self, full_path: impl AsRef<Path>) -> Result<&File, TreeError> {
        let full_path = full_path.as_ref().clean();
        let (Some(parent), Some(name)) = (full_path.parent(), full_path.file_name()) else {
            return NotFoundSnafu {
                directory: self.full_path(),
                target: &full_path,
            }
            .fail();
        };

        let directory = self.get_directory(parent)?;
        directory
            .files
            .get(name)
            .with_context(|| NotFoundSnafu {
                directory: directory.full_path(),
                target: name,
            })
    }

    /// Splits a path strictly below this directory into the intermediate
    /// directory names and the name of the final node.
    fn split_below(&self, full_path: &Path) -> Result<(Vec<OsString>, OsString), TreeError> {
        ensure!(
            self.is_sub_path(full_path),
            PathNotSubpathSnafu {
                path: full_path,
                parent: self.full_path(),
            }
        );

        let parent = self.full_path();
        let mut segments = full_path
            .strip_prefix(&parent)
            .map(|relative| {
                relative
                    .components()
                    .map(|component| component.as_os_str().to_os_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let name = segments.pop().context(PathNotSubpathSnafu {
            path: full_path,
            parent: &parent,
        })?;
        Ok((segments, name))
    }

    /// Walks down `segments`, creating every directory that does not exist yet.
    fn create_path(&mut self, segments: &[OsString]) -> &mut Directory {
        let mut current = self;
        for segment in segments {
            let path = current.full_path();
            current = current
                .sub_directories
                .entry(segment.clone())
                .or_insert_with(|| {
                    trace!("Creating intermediate directory {}", path.join(segment).display());
                    Directory::new(segment.clone(), &path)
                });
        }
        current
    }

    /// Segments of `full_path` below this directory. Empty when `full_path` is
    /// this directory itself.
    fn components_below<'p>(&self, full_path: &'p Path) -> Result<Components<'p>, TreeError> {
        let own = self.full_path();
        full_path
            .strip_prefix(&own)
            .ok()
            .map(Path::components)
            .with_context(|| NotFoundSnafu {
                directory: &own,
                target: full_path,
            })
    }
}

fn remaining_target(component: Component<'_>, rest: &Components<'_>) -> PathBuf {
    Path::new(component.as_os_str()).join(rest.as_path()).clean()
}

#[derive(Debug, Snafu)]
pub enum TreeError {
    #[snafu(display(
        "'{}' must be below the directory it is added to: '{}'",
        path.display(),
        parent.display()
    ))]
    PathNotSubpathError { path: PathBuf, parent: PathBuf },
    #[snafu(display(
        "'{}' could not be found in directory '{}'",
        target.display(),
        directory.display()
    ))]
    NotFoundError { directory: PathBuf, target: PathBuf },
}
