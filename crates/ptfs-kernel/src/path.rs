//! Virtual path → native path.

use std::path::{Component, Path, PathBuf};

/// Join a virtual path under `root`, cleaning the result lexically.
///
/// A leading `/` in `path` is relative to the root. Repeated separators and
/// `.` components vanish, and `..` removes the component before it (never
/// going above `/`). Nothing touches the filesystem, so the result may name
/// something that does not exist, and `..` can walk out of `root`.
pub fn resolve(root: &Path, path: &str) -> PathBuf {
    let mut resolved = PathBuf::new();

    for component in root.components().chain(Path::new(path).components()) {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                if resolved.as_os_str().is_empty() {
                    resolved.push(component);
                }
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // Relative roots keep leading `..`, as a lexical clean would.
                let poppable = matches!(
                    resolved.components().next_back(),
                    Some(Component::Normal(_))
                );
                if poppable {
                    resolved.pop();
                } else if !resolved.has_root() {
                    resolved.push("..");
                }
            }
            Component::Normal(name) => resolved.push(name),
        }
    }

    if resolved.as_os_str().is_empty() {
        resolved.push(".");
    }
    resolved
}
