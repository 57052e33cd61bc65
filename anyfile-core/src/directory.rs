// SPDX-License-Identifier: AGPL-3.0-or-later
//! Directories: listing, classification of children, recursive removal

use async_trait::async_trait;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::any::Any;
use tokio::fs;

use crate::{
    entry::Entry,
    error::{FsError, FsResult},
    kind::AnyEntry,
    operations::MakeDirOptions,
    path::EntryPath,
    resolve::{Candidate, ResolutionOrder},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    path: EntryPath,
}

impl Directory {
    pub fn new(path: impl Into<EntryPath>) -> Self {
        Self { path: path.into() }
    }

    /// Create the directory and return an entry bound to it.
    pub async fn make(path: impl Into<EntryPath>, options: &MakeDirOptions) -> FsResult<Self> {
        let path = path.into();
        tracing::debug!(path = %path, recursive = options.recursive, "make directory");

        let mut builder = fs::DirBuilder::new();
        builder.recursive(options.recursive);
        #[cfg(unix)]
        if let Some(mode) = options.mode {
            builder.mode(mode);
        }

        builder
            .create(&path)
            .await
            .map_err(|e| FsError::from_io(e, &path))?;
        Ok(Self { path })
    }

    /// Paths of the direct children, in enumeration order.
    pub async fn child_paths(&self) -> FsResult<Vec<EntryPath>> {
        let to_err = |e| FsError::from_io(e, &self.path);

        let mut read_dir = fs::read_dir(&self.path).await.map_err(to_err)?;
        let mut paths = Vec::new();
        while let Some(entry) = read_dir.next_entry().await.map_err(to_err)? {
            paths.push(self.path.join(entry.file_name()));
        }
        Ok(paths)
    }

    /// Direct children, classified with the builtin order.
    pub async fn children(&self) -> FsResult<Vec<AnyEntry>> {
        self.children_in(&ResolutionOrder::builtin()).await
    }

    /// Direct children, trying `extra` before the builtin kinds.
    pub async fn children_with(&self, extra: &[Candidate]) -> FsResult<Vec<AnyEntry>> {
        self.children_in(&ResolutionOrder::with_extra(extra.iter().cloned()))
            .await
    }

    /// Direct children, classified with `order`.
    ///
    /// Siblings are classified concurrently. A child that vanishes between
    /// listing and classification fails the whole call.
    pub async fn children_in(&self, order: &ResolutionOrder) -> FsResult<Vec<AnyEntry>> {
        let paths = self.child_paths().await?;
        try_join_all(paths.into_iter().map(|path| order.classify(path))).await
    }

    /// True if the path itself is a symbolic link, whatever it points to.
    pub async fn is_link(&self) -> FsResult<bool> {
        fs::symlink_metadata(&self.path)
            .await
            .map(|meta| meta.file_type().is_symlink())
            .map_err(|e| FsError::from_io(e, &self.path))
    }

    /// Recursive removal with children classified by `order` at every level,
    /// so custom kinds remove themselves their own way.
    ///
    /// A child that is gone by the time its own removal runs is reported as
    /// [`FsError::Race`].
    pub async fn remove_in(&self, order: &ResolutionOrder) -> FsResult<()> {
        self.remove_tree(order).await
    }

    fn remove_tree<'a>(&'a self, order: &'a ResolutionOrder) -> BoxFuture<'a, FsResult<()>> {
        async move {
            if self.is_link().await? {
                tracing::debug!(path = %self.path, "remove directory link");
                return fs::remove_file(&self.path)
                    .await
                    .map_err(|e| FsError::from_io(e, &self.path));
            }

            let children = self.children_in(order).await?;
            tracing::debug!(path = %self.path, children = children.len(), "remove directory");
            try_join_all(children.iter().map(|child| async move {
                let removed = match child {
                    AnyEntry::Directory(dir) => dir.remove_tree(order).await,
                    other => other.remove().await,
                };
                removed.map_err(|e| match e {
                    FsError::NotFound(path) => FsError::Race { path, operation: "remove" },
                    other => other,
                })
            }))
            .await?;
            self.remove_empty().await
        }
        .boxed()
    }

    /// Remove the directory only if it is already empty.
    pub async fn remove_empty(&self) -> FsResult<()> {
        fs::remove_dir(&self.path)
            .await
            .map_err(|e| FsError::from_io(e, &self.path))
    }
}

#[async_trait]
impl Entry for Directory {
    fn path(&self) -> &EntryPath {
        &self.path
    }

    fn path_mut(&mut self) -> &mut EntryPath {
        &mut self.path
    }

    async fn verify(&self) -> bool {
        let verified = self.stat().await.map(|m| m.is_dir()).unwrap_or(false);
        tracing::trace!(path = %self.path, verified, "verify directory");
        verified
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    /// Remove every child, then the directory itself.
    ///
    /// Children are removed concurrently. The first failure is returned and
    /// the directory is left in place; siblings removed before the failure
    /// stay removed. A symlink to a directory is unlinked, never descended.
    async fn remove(&self) -> FsResult<()> {
        self.remove_in(&ResolutionOrder::builtin()).await
    }
}
