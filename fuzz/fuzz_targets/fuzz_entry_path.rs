// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for EntryPath normalization and RegularFile name parsing

#![no_main]

use anyfile_core::{EntryPath, OpenFlags, RegularFile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Open flag strings are short; anything goes, it must not panic
        let _ = input.parse::<OpenFlags>();

        if input.contains('\0') {
            return;
        }

        let path = EntryPath::with_base("/base", input);
        let rendered = path.to_string();

        // Normalization is absolute and idempotent, with no trailing separator
        assert!(rendered.starts_with('/'));
        assert!(rendered == "/" || !rendered.ends_with('/'));
        assert_eq!(EntryPath::new(&rendered), path);

        // The parent is always a prefix and the root is a fixed point
        let parent = path.parent();
        assert!(rendered.starts_with(&parent.to_string()));
        if path.is_root() {
            assert_eq!(parent, path);
        }

        let file = RegularFile::new(path.clone());
        let name = path.name();
        let suffixes = file.suffixes();
        assert_eq!(suffixes.len(), name.matches('.').count());
        if suffixes.is_empty() {
            assert_eq!(file.stem(), name);
        } else {
            assert_eq!(format!("{}.{}", file.stem(), file.suffix()), name);
        }
    }
});
