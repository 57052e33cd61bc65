// SPDX-License-Identifier: AGPL-3.0-or-later
//! The contract shared by every kind of filesystem entry

use async_trait::async_trait;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use tokio::fs;

use crate::{
    directory::Directory,
    error::{FsError, FsResult},
    metadata::Metadata,
    path::EntryPath,
};

/// A single filesystem path with identity, navigation and mutation.
///
/// Implementors supply the path accessors, [`verify`](Entry::verify) and
/// [`as_any`](Entry::as_any); everything else has a default built on them.
/// Construction never touches the filesystem.
#[async_trait]
pub trait Entry: Any + fmt::Debug + Send + Sync {
    fn path(&self) -> &EntryPath;

    fn path_mut(&mut self) -> &mut EntryPath;

    /// Whether the object at `path` currently is this kind of entry.
    ///
    /// A predicate, not an assertion: OS failures answer `false`.
    async fn verify(&self) -> bool;

    /// The concrete value, for runtime type tests.
    fn as_any(&self) -> &dyn Any;

    fn name(&self) -> Cow<'_, str> {
        self.path().name()
    }

    fn parent_path(&self) -> EntryPath {
        self.path().parent()
    }

    fn parent(&self) -> Directory {
        Directory::new(self.parent_path())
    }

    /// Follows symlinks.
    async fn stat(&self) -> FsResult<Metadata> {
        fs::metadata(self.path())
            .await
            .map(Metadata::from)
            .map_err(|e| FsError::from_io(e, self.path()))
    }

    async fn exists(&self) -> bool {
        fs::try_exists(self.path()).await.unwrap_or(false)
    }

    /// Move the entry; the stored path only changes once the move succeeded.
    async fn rename(&mut self, new_path: EntryPath) -> FsResult<()> {
        tracing::debug!(from = %self.path(), to = %new_path, "rename");
        fs::rename(self.path(), &new_path)
            .await
            .map_err(|e| FsError::from_io(e, self.path()))?;
        *self.path_mut() = new_path;
        Ok(())
    }

    async fn remove(&self) -> FsResult<()> {
        tracing::debug!(path = %self.path(), "remove file");
        fs::remove_file(self.path())
            .await
            .map_err(|e| FsError::from_io(e, self.path()))
    }
}

/// Runtime type tests, available on every entry including `dyn Entry`.
pub trait EntryExt: Entry {
    /// True if this value is a `T` (through [`AnyEntry`](crate::AnyEntry) too).
    fn is<T: Entry>(&self) -> bool {
        self.as_any().is::<T>()
    }

    fn downcast_ref<T: Entry>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl<E: Entry + ?Sized> EntryExt for E {}
