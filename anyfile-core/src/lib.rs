// SPDX-License-Identifier: AGPL-3.0-or-later
//! anyfile core
//!
//! Typed filesystem entries. A path is modeled as a [`RegularFile`], a
//! [`Directory`] or an [`Unclassified`] entry; [`ResolutionOrder`] decides
//! which kind an existing path is by asking each candidate to `verify()`
//! itself, first match wins.

pub mod directory;
pub mod entry;
pub mod error;
pub mod file;
pub mod kind;
pub mod metadata;
pub mod operations;
pub mod path;
pub mod resolve;
pub mod unclassified;

pub use directory::Directory;
pub use entry::{Entry, EntryExt};
pub use error::{FsError, FsResult};
pub use file::RegularFile;
pub use kind::{AnyEntry, EntryKind};
pub use metadata::{FileType, Metadata};
pub use operations::{MakeDirOptions, OpenFlags, OpenOptions};
pub use path::EntryPath;
pub use resolve::{Candidate, ResolutionOrder};
pub use unclassified::Unclassified;
