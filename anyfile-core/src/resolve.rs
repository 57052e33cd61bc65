// SPDX-License-Identifier: AGPL-3.0-or-later
//! Classification of paths into entry kinds
//!
//! A [`ResolutionOrder`] is an ordered list of candidates. Classifying a path
//! builds each candidate's entry in turn and keeps the first one whose
//! `verify()` answers true.

use std::fmt;
use std::sync::Arc;
use tokio::fs;

use crate::{
    directory::Directory,
    entry::Entry,
    error::{FsError, FsResult},
    file::RegularFile,
    kind::{AnyEntry, EntryKind},
    path::EntryPath,
    unclassified::Unclassified,
};

type Constructor = Arc<dyn Fn(EntryPath) -> AnyEntry + Send + Sync>;

/// One kind that classification may try
#[derive(Clone)]
pub struct Candidate {
    kind: EntryKind,
    construct: Constructor,
}

impl Candidate {
    pub fn directory() -> Self {
        Self {
            kind: EntryKind::Directory,
            construct: Arc::new(|path: EntryPath| AnyEntry::Directory(Directory::new(path))),
        }
    }

    pub fn file() -> Self {
        Self {
            kind: EntryKind::File,
            construct: Arc::new(|path: EntryPath| AnyEntry::File(RegularFile::new(path))),
        }
    }

    pub fn unclassified() -> Self {
        Self {
            kind: EntryKind::Unclassified,
            construct: Arc::new(|path: EntryPath| AnyEntry::Unclassified(Unclassified::new(path))),
        }
    }

    /// A caller-defined kind, built by `construct` and recognised by its own
    /// `verify()`.
    pub fn custom<E, F>(label: &'static str, construct: F) -> Self
    where
        E: Entry,
        F: Fn(EntryPath) -> E + Send + Sync + 'static,
    {
        Self {
            kind: EntryKind::Custom(label.to_string()),
            construct: Arc::new(move |path: EntryPath| AnyEntry::Custom(label, Box::new(construct(path)))),
        }
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn construct(&self, path: EntryPath) -> AnyEntry {
        (self.construct)(path)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate").field("kind", &self.kind).finish()
    }
}

/// Ordered candidates; earlier entries win ties
#[derive(Debug, Clone)]
pub struct ResolutionOrder {
    candidates: Vec<Candidate>,
}

impl ResolutionOrder {
    /// A fully custom order. Without a fallback at the end, classification of
    /// an existing path can fail with [`FsError::Unclassifiable`].
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Directory, then regular file, then the unclassified fallback.
    pub fn builtin() -> Self {
        Self::new(vec![
            Candidate::directory(),
            Candidate::file(),
            Candidate::unclassified(),
        ])
    }

    /// `extra` first, then the builtin order.
    pub fn with_extra(extra: impl IntoIterator<Item = Candidate>) -> Self {
        let mut candidates: Vec<Candidate> = extra.into_iter().collect();
        candidates.extend(Self::builtin().candidates);
        Self::new(candidates)
    }

    pub fn kinds(&self) -> Vec<EntryKind> {
        self.candidates.iter().map(|c| c.kind.clone()).collect()
    }

    /// Classify the object at `path`.
    ///
    /// The path is first checked without following symlinks; if it is gone the
    /// caller raced a concurrent change and gets [`FsError::Race`]. Candidates
    /// are then tried strictly in order.
    pub async fn classify(&self, path: EntryPath) -> FsResult<AnyEntry> {
        if let Err(e) = fs::symlink_metadata(&path).await {
            let err = FsError::from_io(e, &path);
            return Err(if err.is_not_found() {
                FsError::Race { path, operation: "classify" }
            } else {
                err
            });
        }

        for candidate in &self.candidates {
            let entry = candidate.construct(path.clone());
            if entry.verify().await {
                tracing::debug!(path = %path, kind = %candidate.kind, "classified");
                return Ok(entry);
            }
        }

        Err(FsError::Unclassifiable(path))
    }
}

impl Default for ResolutionOrder {
    fn default() -> Self {
        Self::builtin()
    }
}
