// SPDX-License-Identifier: AGPL-3.0-or-later
//! Operation options

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MakeDirOptions {
    /// Create missing parents and accept an existing directory
    pub recursive: bool,
    /// Unix permission bits for created directories
    pub mode: Option<u32>,
}

impl MakeDirOptions {
    pub fn recursive() -> Self {
        Self { recursive: true, ..Default::default() }
    }
}

/// Access flags for opening a file.
///
/// Parses the short flag strings common to POSIX tooling: `r`, `r+`, `w`,
/// `w+`, `a`, `a+`, with an `x` to require that the file does not exist yet
/// (`wx`, `ax+`, ...) and an `s` accepted and ignored (`rs+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpenFlags {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub truncate: bool,
    pub create: bool,
    pub create_new: bool,
}

impl OpenFlags {
    pub fn read() -> Self {
        Self { read: true, ..Default::default() }
    }

    pub fn write() -> Self {
        Self { write: true, truncate: true, create: true, ..Default::default() }
    }

    pub fn append() -> Self {
        Self { append: true, create: true, ..Default::default() }
    }
}

impl FromStr for OpenFlags {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FsError::InvalidOpenMode(s.to_string());

        let mut base = None;
        let mut plus = false;
        let mut exclusive = false;
        for c in s.chars() {
            match c {
                'r' | 'w' | 'a' if base.is_none() => base = Some(c),
                '+' if !plus => plus = true,
                'x' if !exclusive => exclusive = true,
                's' => {}
                _ => return Err(invalid()),
            }
        }

        let mut flags = match base.ok_or_else(invalid)? {
            'r' if exclusive => return Err(invalid()),
            'r' => OpenFlags::read(),
            'w' => OpenFlags::write(),
            _ => OpenFlags::append(),
        };
        if plus {
            flags.read = true;
            flags.write = flags.write || !flags.append;
        }
        if exclusive {
            flags.create = false;
            flags.create_new = true;
        }
        Ok(flags)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenOptions {
    pub flags: OpenFlags,
    /// Unix permission bits applied if the file gets created
    pub mode: Option<u32>,
}

impl OpenOptions {
    pub fn new(flags: OpenFlags) -> Self {
        Self { flags, mode: None }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub(crate) fn to_tokio(&self) -> tokio::fs::OpenOptions {
        let mut opts = tokio::fs::OpenOptions::new();
        opts.read(self.flags.read)
            .write(self.flags.write)
            .append(self.flags.append)
            .truncate(self.flags.truncate)
            .create(self.flags.create)
            .create_new(self.flags.create_new);

        #[cfg(unix)]
        if let Some(mode) = self.mode {
            opts.mode(mode);
        }

        opts
    }
}

impl FromStr for OpenOptions {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(OpenOptions::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_flags() {
        assert_eq!("r".parse::<OpenFlags>().unwrap(), OpenFlags::read());

        let flags: OpenFlags = "r+".parse().unwrap();
        assert!(flags.read && flags.write);
        assert!(!flags.create && !flags.truncate);

        let flags: OpenFlags = "rs+".parse().unwrap();
        assert!(flags.read && flags.write);
    }

    #[test]
    fn test_parse_write_flags() {
        assert_eq!("w".parse::<OpenFlags>().unwrap(), OpenFlags::write());

        let flags: OpenFlags = "w+".parse().unwrap();
        assert!(flags.read && flags.write && flags.truncate && flags.create);

        let flags: OpenFlags = "wx".parse().unwrap();
        assert!(flags.write && flags.create_new && !flags.create);
    }

    #[test]
    fn test_parse_append_flags() {
        assert_eq!("a".parse::<OpenFlags>().unwrap(), OpenFlags::append());

        let flags: OpenFlags = "a+".parse().unwrap();
        assert!(flags.read && flags.append && !flags.write);

        let flags: OpenFlags = "ax".parse().unwrap();
        assert!(flags.append && flags.create_new);
    }

    #[test]
    fn test_parse_invalid_flags() {
        for bad in ["", "q", "rw", "rx", "w++", "+"] {
            let err = bad.parse::<OpenFlags>().unwrap_err();
            assert!(matches!(err, FsError::InvalidOpenMode(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_make_dir_defaults() {
        let opts = MakeDirOptions::default();
        assert!(!opts.recursive);
        assert!(opts.mode.is_none());
        assert!(MakeDirOptions::recursive().recursive);
    }
}
