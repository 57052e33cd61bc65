// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fallback kind for anything that is neither a file nor a directory

use async_trait::async_trait;
use std::any::Any;

use crate::{entry::Entry, path::EntryPath};

/// Matches every path, so classification of an existing path always succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unclassified {
    path: EntryPath,
}

impl Unclassified {
    pub fn new(path: impl Into<EntryPath>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Entry for Unclassified {
    fn path(&self) -> &EntryPath {
        &self.path
    }

    fn path_mut(&mut self) -> &mut EntryPath {
        &mut self.path
    }

    async fn verify(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
