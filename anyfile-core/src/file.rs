// SPDX-License-Identifier: AGPL-3.0-or-later
//! Regular files

use async_trait::async_trait;
use std::any::Any;

use crate::{
    entry::Entry,
    error::{FsError, FsResult},
    operations::OpenOptions,
    path::EntryPath,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularFile {
    path: EntryPath,
}

impl RegularFile {
    pub fn new(path: impl Into<EntryPath>) -> Self {
        Self { path: path.into() }
    }

    /// Open the file and hand back the raw handle.
    pub async fn open(&self, options: &OpenOptions) -> FsResult<tokio::fs::File> {
        tracing::debug!(path = %self.path, flags = ?options.flags, "open");
        options
            .to_tokio()
            .open(&self.path)
            .await
            .map_err(|e| FsError::from_io(e, &self.path))
    }

    /// Name without its final extension.
    pub fn stem(&self) -> String {
        let name = self.name();
        match name.rfind('.') {
            Some(i) => name[..i].to_string(),
            None => name.into_owned(),
        }
    }

    /// Final extension without the dot, empty if there is none.
    pub fn suffix(&self) -> String {
        let name = self.name();
        match name.rfind('.') {
            Some(i) => name[i + 1..].to_string(),
            None => String::new(),
        }
    }

    /// Every dot-separated segment after the first, in order.
    pub fn suffixes(&self) -> Vec<String> {
        self.name().split('.').skip(1).map(String::from).collect()
    }
}

#[async_trait]
impl Entry for RegularFile {
    fn path(&self) -> &EntryPath {
        &self.path
    }

    fn path_mut(&mut self) -> &mut EntryPath {
        &mut self.path
    }

    async fn verify(&self) -> bool {
        let verified = self.stat().await.map(|m| m.is_file()).unwrap_or(false);
        tracing::trace!(path = %self.path, verified, "verify file");
        verified
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_parsing() {
        let file = RegularFile::new("/tmp/hoge.tar.gz");
        assert_eq!(file.suffix(), "gz");
        assert_eq!(file.suffixes(), vec!["tar", "gz"]);
        assert_eq!(file.stem(), "hoge.tar");
    }

    #[test]
    fn test_no_suffix() {
        let file = RegularFile::new("/tmp/README");
        assert_eq!(file.stem(), "README");
        assert_eq!(file.suffix(), "");
        assert!(file.suffixes().is_empty());
    }

    #[test]
    fn test_consecutive_dots() {
        let file = RegularFile::new("/tmp/a..b");
        assert_eq!(file.suffixes(), vec!["", "b"]);
        assert_eq!(file.suffix(), "b");
        assert_eq!(file.stem(), "a.");
    }

    #[test]
    fn test_dotfile() {
        let file = RegularFile::new("/home/user/.bashrc");
        assert_eq!(file.stem(), "");
        assert_eq!(file.suffix(), "bashrc");
        assert_eq!(file.suffixes(), vec!["bashrc"]);
    }
}
