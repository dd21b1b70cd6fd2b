use std::path::{Component, Path, PathBuf};

/// Lexically cleans a path: redundant and trailing separators are dropped,
/// `.` segments are removed and `..` consumes the preceding normal segment.
///
/// No filesystem access happens here, so symbolic links are not resolved.
/// An empty result is returned as `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    components.push(component);
                }
            },
            _ => components.push(component),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

pub trait CleanPathExt {
    fn clean(&self) -> PathBuf;
}

impl CleanPathExt for Path {
    fn clean(&self) -> PathBuf {
        clean_path(self)
    }
}

impl CleanPathExt for PathBuf {
    fn clean(&self) -> PathBuf {
        clean_path(self)
    }
}

impl CleanPathExt for &str {
    fn clean(&self) -> PathBuf {
        clean_path(Path::new(self))
    }
}

impl CleanPathExt for String {
    fn clean(&self) -> PathBuf {
        clean_path(Path::new(self))
    }
}
