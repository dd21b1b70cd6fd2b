use std::collections::VecDeque;
use std::ffi::OsStr;
use std::path::MAIN_SEPARATOR;

use super::{Directory, File};

const INDENT: &str = "    ";

impl Directory {
    /// Depth first search by name, starting with this directory itself.
    ///
    /// Sibling order follows map iteration, so when several directories share
    /// `name` there is no guarantee which one is returned.
    pub fn find_directory_depth(&self, name: &str) -> Option<&Directory> {
        if self.name == name {
            return Some(self);
        }
        self.sub_directories
            .values()
            .find_map(|directory| directory.find_directory_depth(name))
    }

    /// Breadth first search by name, starting with this directory itself.
    pub fn find_directory_breadth(&self, name: &str) -> Option<&Directory> {
        self.breadth_first().find(|directory| directory.name == name)
    }

    /// Depth first search for a file by name.
    pub fn find_file_depth(&self, name: &str) -> Option<&File> {
        self.files.get(OsStr::new(name)).or_else(|| {
            self.sub_directories
                .values()
                .find_map(|directory| directory.find_file_depth(name))
        })
    }

    /// Breadth first search for a file by name.
    pub fn find_file_breadth(&self, name: &str) -> Option<&File> {
        self.breadth_first()
            .find_map(|directory| directory.files.get(OsStr::new(name)))
    }

    /// Calls `f` on this directory and then on every directory below it, depth
    /// first. The first error stops the walk and is returned; changes already
    /// made by `f` are kept.
    pub fn map_fn_depth<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&mut Directory) -> Result<(), E>,
    {
        self.map_fn_depth_with(&mut f)
    }

    fn map_fn_depth_with<F, E>(&mut self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut Directory) -> Result<(), E>,
    {
        f(self)?;
        for directory in self.sub_directories.values_mut() {
            directory.map_fn_depth_with(f)?;
        }
        Ok(())
    }

    /// Calls `f` on this directory and then on every directory below it, level
    /// by level. The first error stops the walk and is returned; changes already
    /// made by `f` are kept.
    pub fn map_fn_breadth<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&mut Directory) -> Result<(), E>,
    {
        let mut queue = VecDeque::from([self]);
        while let Some(directory) = queue.pop_front() {
            f(directory)?;
            queue.extend(directory.sub_directories.values_mut());
        }
        Ok(())
    }

    /// Renders the tree as an indented listing.
    ///
    /// The first line is the full path of this directory. Every directory and
    /// file below it follows in path order, as a separator and its name,
    /// indented four spaces per level. Depth is counted from this directory,
    /// not from the filesystem root, so the direct children of the receiver
    /// are indented once whatever its own location.
    pub fn print(&self) -> String {
        let root = self.full_path();
        let root_depth = root.components().count();

        let mut outputs = self
            .breadth_first()
            .flat_map(|directory| {
                std::iter::once(directory.full_path())
                    .chain(directory.files.values().map(File::full_path))
            })
            .collect::<Vec<_>>();
        outputs.sort();

        outputs
            .iter()
            .map(|path| {
                let depth = path.components().count().saturating_sub(root_depth);
                if depth == 0 {
                    return path.display().to_string();
                }
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_default();
                format!("{}{MAIN_SEPARATOR}{name}", INDENT.repeat(depth))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn breadth_first(&self) -> impl Iterator<Item = &Directory> {
        let mut queue = VecDeque::from([self]);
        std::iter::from_fn(move || {
            let directory = queue.pop_front()?;
            queue.extend(directory.sub_directories.values());
            Some(directory)
        })
    }
}
