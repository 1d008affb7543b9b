//! Lexical path normalization.
//!
//! Targets are compared against the managed root and used as cache keys, so `.` and `..`
//! are resolved first. Resolution is purely lexical: the file does not need to exist and
//! symlinks are not followed.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root. A relative path keeps leading `..` components
/// it cannot resolve.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::Prefix(_) | Component::RootDir) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}

/// Whether `path` lies under `root` once both are normalized
pub fn is_under(path: &Path, root: &Path) -> bool {
    normalize(path).starts_with(normalize(root))
}
