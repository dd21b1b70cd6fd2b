use super::{Directory, File};

/// Every directory and file found below a directory at the time it was collected.
///
/// The snapshot borrows from the tree, so it cannot outlive a later mutation.
#[derive(Debug, Clone, Default)]
pub struct Descendants<'a> {
    directories: Vec<&'a Directory>,
    files: Vec<&'a File>,
}

impl<'a> Descendants<'a> {
    pub fn new(directories: Vec<&'a Directory>, files: Vec<&'a File>) -> Self {
        Self { directories, files }
    }

    pub fn directories(&self) -> &[&'a Directory] {
        &self.directories
    }

    pub fn files(&self) -> &[&'a File] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    /// Matches by name and location only, see [`Directory::equals`].
    pub fn contains_directory(&self, directory: &Directory) -> bool {
        self.directories
            .iter()
            .any(|candidate| candidate.equals(directory))
    }

    pub fn contains_file(&self, file: &File) -> bool {
        self.files.iter().any(|candidate| *candidate == file)
    }
}

impl Directory {
    /// Collects every directory and file below this one, not including itself.
    pub fn get_all_descendants(&self) -> Descendants<'_> {
        let mut descendants = Descendants::default();
        self.collect_descendants(&mut descendants);
        descendants
    }

    fn collect_descendants<'a>(&'a self, descendants: &mut Descendants<'a>) {
        descendants.files.extend(self.files.values());
        for directory in self.sub_directories.values() {
            descendants.directories.push(directory);
            directory.collect_descendants(descendants);
        }
    }
}
