//! Link target resolution
//!
//! A link file's header information names the real file. Relative targets
//! are relative to the directory holding the link file, never to the
//! process working directory.

use std::path::{Component, Path, PathBuf};

use simstore_core::{Error, Result};

/// Resolve the target named by a link file's header information.
///
/// Absolute targets are returned unchanged (normalised); relative targets
/// are joined onto `link_path`'s directory. A relative `link_path` is first
/// made absolute against the working directory, so the result is always
/// absolute. Resolution is otherwise lexical: the target need not exist.
pub fn resolve_link_target(link_path: &Path, information: &str) -> Result<PathBuf> {
    let target = information.trim();
    if target.is_empty() {
        return Err(Error::InvalidPath(format!(
            "link file {:?} names no target",
            link_path
        )));
    }

    let target = Path::new(target);
    if target.is_absolute() {
        return Ok(normalize(target));
    }
    let link_path = absolute(link_path)?;
    let base = link_path.parent().unwrap_or_else(|| Path::new("/"));
    Ok(normalize(&base.join(target)))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| {
        Error::InvalidPath(format!("cannot make {:?} absolute: {}", path, e))
    })?;
    Ok(cwd.join(path))
}

/// Remove `.` components and fold `..` into the preceding component.
///
/// A leading `..` on a relative path is kept; `..` directly under the root
/// stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
