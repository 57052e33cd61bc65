// SPDX-License-Identifier: AGPL-3.0-or-later
//! Normalized absolute paths

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

/// Absolute, lexically normalized path of a filesystem entry.
///
/// Relative inputs are resolved against the process working directory at
/// construction time. `.` and `..` segments and repeated separators are folded,
/// and a trailing separator is dropped; the root stays the root. No I/O is
/// performed, so the path may or may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from(MAIN_SEPARATOR_STR));
        Self::with_base(cwd, path)
    }

    /// Resolve `path` against `base` instead of the working directory.
    pub fn with_base(base: impl AsRef<Path>, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.is_absolute() {
            Self(normalize(path))
        } else {
            Self(normalize(&base.as_ref().join(path)))
        }
    }

    pub fn root() -> Self {
        Self(PathBuf::from(MAIN_SEPARATOR_STR))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Last segment; empty for the root.
    pub fn name(&self) -> Cow<'_, str> {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Everything but the last segment. The root is its own parent.
    pub fn parent(&self) -> Self {
        match self.0.parent() {
            Some(parent) => Self(parent.to_path_buf()),
            None => self.clone(),
        }
    }

    pub fn join(&self, name: impl AsRef<Path>) -> Self {
        Self::with_base(&self.0, name)
    }

    pub fn is_root(&self) -> bool {
        self.0.parent().is_none()
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(MAIN_SEPARATOR_STR),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(MAIN_SEPARATOR_STR);
    }
    out
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for EntryPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for EntryPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for EntryPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for EntryPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for EntryPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}
