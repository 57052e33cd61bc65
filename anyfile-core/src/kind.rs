// SPDX-License-Identifier: AGPL-3.0-or-later
//! Entry kinds and the sum type over them

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use crate::{
    directory::Directory,
    entry::Entry,
    error::FsResult,
    file::RegularFile,
    metadata::Metadata,
    path::EntryPath,
    unclassified::Unclassified,
};

/// Entry kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
    Unclassified,
    /// Caller-registered kind, by label
    Custom(String),
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => f.write_str("directory"),
            EntryKind::File => f.write_str("file"),
            EntryKind::Unclassified => f.write_str("unclassified"),
            EntryKind::Custom(label) => f.write_str(label),
        }
    }
}

/// A classified entry.
///
/// Implements [`Entry`] by delegating to the wrapped value, so a directory
/// inside an `AnyEntry` still removes recursively and type tests see through
/// the wrapper.
#[derive(Debug)]
pub enum AnyEntry {
    Directory(Directory),
    File(RegularFile),
    Unclassified(Unclassified),
    Custom(&'static str, Box<dyn Entry>),
}

impl AnyEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            AnyEntry::Directory(_) => EntryKind::Directory,
            AnyEntry::File(_) => EntryKind::File,
            AnyEntry::Unclassified(_) => EntryKind::Unclassified,
            AnyEntry::Custom(label, _) => EntryKind::Custom((*label).to_string()),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, AnyEntry::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, AnyEntry::File(_))
    }

    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            AnyEntry::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&RegularFile> {
        match self {
            AnyEntry::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn into_directory(self) -> Option<Directory> {
        match self {
            AnyEntry::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn into_file(self) -> Option<RegularFile> {
        match self {
            AnyEntry::File(file) => Some(file),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Entry {
        match self {
            AnyEntry::Directory(dir) => dir,
            AnyEntry::File(file) => file,
            AnyEntry::Unclassified(entry) => entry,
            AnyEntry::Custom(_, entry) => &**entry,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Entry {
        match self {
            AnyEntry::Directory(dir) => dir,
            AnyEntry::File(file) => file,
            AnyEntry::Unclassified(entry) => entry,
            AnyEntry::Custom(_, entry) => &mut **entry,
        }
    }
}

#[async_trait]
impl Entry for AnyEntry {
    fn path(&self) -> &EntryPath {
        self.inner().path()
    }

    fn path_mut(&mut self) -> &mut EntryPath {
        self.inner_mut().path_mut()
    }

    async fn verify(&self) -> bool {
        self.inner().verify().await
    }

    fn as_any(&self) -> &dyn Any {
        self.inner().as_any()
    }

    async fn stat(&self) -> FsResult<Metadata> {
        self.inner().stat().await
    }

    async fn exists(&self) -> bool {
        self.inner().exists().await
    }

    async fn rename(&mut self, new_path: EntryPath) -> FsResult<()> {
        self.inner_mut().rename(new_path).await
    }

    async fn remove(&self) -> FsResult<()> {
        self.inner().remove().await
    }
}

impl From<Directory> for AnyEntry {
    fn from(dir: Directory) -> Self {
        AnyEntry::Directory(dir)
    }
}

impl From<RegularFile> for AnyEntry {
    fn from(file: RegularFile) -> Self {
        AnyEntry::File(file)
    }
}

impl From<Unclassified> for AnyEntry {
    fn from(entry: Unclassified) -> Self {
        AnyEntry::Unclassified(entry)
    }
}
