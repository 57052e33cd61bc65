// SPDX-License-Identifier: AGPL-3.0-or-later
//! File and directory metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the OS reports an object to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    File,
    Directory,
    Symlink,
    /// Sockets, pipes, devices
    Other,
}

impl From<std::fs::FileType> for FileType {
    fn from(ft: std::fs::FileType) -> Self {
        if ft.is_dir() {
            FileType::Directory
        } else if ft.is_file() {
            FileType::File
        } else if ft.is_symlink() {
            FileType::Symlink
        } else {
            FileType::Other
        }
    }
}

/// Snapshot of OS metadata for one path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub file_type: FileType,
    pub len: u64,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    /// Unix permission bits, `None` elsewhere
    pub mode: Option<u32>,
    pub readonly: bool,
}

impl Metadata {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }
}

impl From<std::fs::Metadata> for Metadata {
    fn from(meta: std::fs::Metadata) -> Self {
        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::MetadataExt;
            Some(meta.mode())
        };
        #[cfg(not(unix))]
        let mode = None;

        Self {
            file_type: meta.file_type().into(),
            len: meta.len(),
            modified: meta.modified().ok().map(DateTime::from),
            accessed: meta.accessed().ok().map(DateTime::from),
            created: meta.created().ok().map(DateTime::from),
            mode,
            readonly: meta.permissions().readonly(),
        }
    }
}
