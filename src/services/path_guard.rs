//! Path containment guard — the single security boundary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Confines file access to a project subtree.
///
/// Containment is judged on canonicalized paths: `.`/`..` segments and
/// symlinks are resolved before the prefix comparison, so traversal
/// sequences cannot escape the root. The root is fixed at construction;
/// switching projects means constructing a new guard, never mutating this
/// one.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// Create a guard for the given project root.
    ///
    /// The root is canonicalized up front. A root that cannot be resolved is
    /// kept as-is, which makes the guard reject every candidate whose
    /// canonical form differs.
    pub fn new(root: &Path) -> Self {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        Self { root }
    }

    /// Canonical project root this guard confines access to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true iff `path` resolves to a location inside the project
    /// root. Rejections are logged with the offending path and the root.
    pub fn is_allowed(&self, path: &Path) -> bool {
        match resolve(path) {
            Some(resolved) if resolved.starts_with(&self.root) => true,
            _ => {
                warn!(
                    path = %path.display(),
                    root = %self.root.display(),
                    "rejected file access outside the active project"
                );
                false
            }
        }
    }
}

/// Canonicalize `path`, tolerating a target that does not exist yet.
///
/// Falls back to canonicalizing the nearest existing ancestor and
/// re-appending the remaining components. A non-existing suffix containing
/// `.` or `..` cannot be resolved safely and yields `None` (rejected).
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Some(resolved);
    }

    let mut suffix: Vec<OsString> = Vec::new();
    let mut current = path;
    loop {
        // file_name() is None for `.` and `..` components, which rejects
        // unresolvable traversal in the missing part of the path.
        suffix.push(current.file_name()?.to_os_string());
        current = current.parent()?;
        if let Ok(mut resolved) = current.canonicalize() {
            for part in suffix.iter().rev() {
                resolved.push(part);
            }
            return Some(resolved);
        }
    }
}
