use std::path::{Path, PathBuf};
use std::{fs, io};

use snafu::{ResultExt, Snafu, ensure};
use tracing::{debug, trace};
use walkdir::WalkDir;

use super::{Directory, TreeError};

/// Reads the directory tree rooted at `full_path` from disk.
///
/// The root is resolved once through the filesystem (symbolic links and `..`
/// included) and that same canonical path is both checked and walked, so the
/// tree always describes the directory that was actually read. Entries are
/// added top-down, so every parent exists before its children. The first I/O
/// error aborts the scan. Symbolic links below the root are not followed and
/// end up as files.
pub fn get_directory_structure(full_path: impl AsRef<Path>) -> Result<Directory, ScanError> {
    let full_path = full_path.as_ref();
    let root_path = match fs::canonicalize(full_path) {
        Ok(root_path) => root_path,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return DoesNotExistSnafu { path: full_path }.fail();
        }
        Err(source) => return Err(source).context(MetadataSnafu { path: full_path }),
    };
    let metadata = root_path
        .metadata()
        .context(MetadataSnafu { path: &root_path })?;
    ensure!(metadata.is_dir(), NotADirectorySnafu { path: full_path });
    debug!("Scanning directory structure of {}", root_path.display());

    let mut root = Directory::from_full_path(&root_path);
    let mut entries = 0usize;
    for entry in WalkDir::new(&root_path).min_depth(1) {
        let entry = entry.context(WalkSnafu { path: &root_path })?;
        trace!("Visiting {}", entry.path().display());

        if entry.file_type().is_dir() {
            root.add_directory(entry.path()).context(InsertSnafu)?;
        } else {
            root.add_file(entry.path()).context(InsertSnafu)?;
        }
        entries += 1;
    }

    debug!("Scanned {} entries below {}", entries, root_path.display());
    Ok(root)
}

#[derive(Debug, Snafu)]
pub enum ScanError {
    #[snafu(display("Path '{}' does not exist", path.display()))]
    DoesNotExistError { path: PathBuf },
    #[snafu(display("Path '{}' is not a directory", path.display()))]
    NotADirectoryError { path: PathBuf },
    #[snafu(display("Failed to read metadata of '{}'", path.display()))]
    MetadataError { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to walk directory '{}'", path.display()))]
    WalkError {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[snafu(display("Failed to add a scanned entry to the tree"))]
    InsertError { source: TreeError },
}

impl ScanError {
    /// Whether the scan failed because the root path is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScanError::DoesNotExistError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_on_disk(root: &Path) {
        fs::create_dir(root.join("dir1")).expect("Failed to create dir1");
        fs::create_dir_all(root.join("dir2").join("sub1")).expect("Failed to create sub1");
        fs::create_dir_all(root.join("dir2").join("sub2")).expect("Failed to create sub2");
        fs::create_dir_all(root.join("dir2").join("sub3")).expect("Failed to create sub3");
        fs::create_dir(root.join("dir3")).expect("Failed to create dir3");
        fs::write(root.join("dir2").join("sub2").join("file"), b"").expect("Failed to write file");
        fs::write(root.join("top.txt"), b"content").expect("Failed to write top.txt");
    }

    fn build_in_memory(root: &Path) -> Directory {
        let mut expected = Directory::from_full_path(root);
        expected.add_directory(root.join("dir1")).unwrap();
        let dir2 = expected.add_directory(root.join("dir2")).unwrap();
        dir2.add_directory(root.join("dir2").join("sub1")).unwrap();
        let sub2 = dir2.add_directory(root.join("dir2").join("sub2")).unwrap();
        sub2.add_file(root.join("dir2").join("sub2").join("file")).unwrap();
        dir2.add_directory(root.join("dir2").join("sub3")).unwrap();
        expected.add_directory(root.join("dir3")).unwrap();
        expected.add_file(root.join("top.txt")).unwrap();
        expected
    }

    #[test]
    fn test_scan_matches_tree_built_in_memory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        build_on_disk(&root);

        let actual = get_directory_structure(&root).expect("Failed to scan directory");
        let expected = build_in_memory(&root);

        assert!(actual.structure_equals(&expected));
        assert_eq!(actual.get_all_descendants().directories().len(), 6);
        assert_eq!(actual.get_all_descendants().files().len(), 2);
    }

    #[test]
    fn test_scan_of_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let actual = get_directory_structure(temp_dir.path()).expect("Failed to scan directory");

        assert!(actual.get_all_descendants().is_empty());
        assert_eq!(actual.full_path(), fs::canonicalize(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_scan_detects_structural_difference() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        build_on_disk(&root);
        fs::create_dir(root.join("unexpected")).expect("Failed to create directory");

        let actual = get_directory_structure(&root).expect("Failed to scan directory");

        assert!(!actual.structure_equals(&build_in_memory(&root)));
    }

    #[test]
    fn test_scan_nonexistent_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missingDir");

        let result = get_directory_structure(&missing);

        match result {
            Err(error) => {
                assert!(error.is_not_found());
                assert_eq!(
                    error.to_string(),
                    format!("Path '{}' does not exist", missing.display())
                );
            }
            Ok(_) => panic!("Expected DoesNotExistError"),
        }
    }

    #[test]
    fn test_scan_file_is_not_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("file");
        fs::write(&file, b"").expect("Failed to write file");

        let result = get_directory_structure(&file);

        match result {
            Err(ScanError::NotADirectoryError { path }) => assert_eq!(path, file),
            other => panic!("Expected NotADirectoryError, got {other:?}"),
        }
    }

    #[test]
    fn test_nonexistent_root_path() {
        let result = get_directory_structure("/nonexistent/path/for/scan");
        assert!(result.is_err_and(|error| error.is_not_found()));
    }

    #[test]
    fn test_scan_relative_root_is_resolved() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir(root.join("a")).expect("Failed to create a");
        fs::write(root.join("a").join("file"), b"").expect("Failed to write file");

        let actual = get_directory_structure(root.join("a").join(".."))
            .expect("Failed to scan directory");

        assert_eq!(actual.full_path(), root);
        assert!(actual.get_file(root.join("a").join("file")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_parent_of_symlink_reads_link_target_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::create_dir_all(root.join("real").join("inner")).expect("Failed to create inner");
        fs::write(root.join("real").join("real.txt"), b"").expect("Failed to write real.txt");
        fs::create_dir(root.join("a")).expect("Failed to create a");
        fs::write(root.join("a").join("a.txt"), b"").expect("Failed to write a.txt");
        std::os::unix::fs::symlink(root.join("real").join("inner"), root.join("a").join("link"))
            .expect("Failed to create symlink");

        let actual = get_directory_structure(root.join("a").join("link").join(".."))
            .expect("Failed to scan directory");

        assert_eq!(actual.full_path(), root.join("real"));
        assert!(actual.get_file(root.join("real").join("real.txt")).is_ok());
        assert!(actual.get_directory(root.join("real").join("inner")).is_ok());
        assert!(actual.find_file_depth("a.txt").is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scan_keeps_non_utf8_names_apart() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let first = OsStr::from_bytes(b"a\xff");
        let second = OsStr::from_bytes(b"a\xfe");
        fs::write(root.join(first), b"").expect("Failed to write first file");
        fs::write(root.join(second), b"").expect("Failed to write second file");

        let actual = get_directory_structure(&root).expect("Failed to scan directory");

        assert_eq!(actual.files().len(), 2);
        assert!(actual.get_file(root.join(first)).is_ok());
        assert!(actual.get_file(root.join(second)).is_ok());
        assert_eq!(actual.get_file(root.join(first)).unwrap().name(), first);
    }
}
