// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use anyfile_core::{
    AnyEntry, Directory, Entry, EntryKind, EntryPath, FsError, MakeDirOptions, Metadata,
    OpenFlags, OpenOptions, ResolutionOrder,
};
use chrono::{DateTime, Utc};
use console::style;
use futures::future::join_all;
use serde::Serialize;
use tabled::{Table, Tabled};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a regular file: {0}")]
    NotAFile(EntryPath),
}

pub type CliResult<T> = Result<T, CliError>;

/// Classify a command-line path with the builtin order.
///
/// A path missing when first touched is reported as not found.
async fn classify(path: &str) -> CliResult<AnyEntry> {
    let path = EntryPath::new(path);
    ResolutionOrder::builtin()
        .classify(path)
        .await
        .map_err(|e| match e {
            FsError::Race { path, .. } => CliError::from(FsError::NotFound(path)),
            other => CliError::from(other),
        })
}

/// Octal permission bits, as accepted by `mkdir -m`
pub fn parse_mode(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
        .ok_or_else(|| format!("invalid octal mode: {s}"))
}

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format file size
fn format_size(size: Option<u64>, human: bool) -> String {
    match size {
        Some(s) if human => bytesize::ByteSize(s).to_string(),
        Some(s) => s.to_string(),
        None => "-".to_string(),
    }
}

/// Format entry kind
fn format_kind(kind: &EntryKind) -> String {
    match kind {
        EntryKind::Directory => style("d").cyan().to_string(),
        EntryKind::File => "-".to_string(),
        EntryKind::Unclassified => "?".to_string(),
        EntryKind::Custom(label) => style(label).magenta().to_string(),
    }
}

/// Format permissions
fn format_permissions(mode: Option<u32>) -> String {
    match mode {
        Some(m) => {
            let bit = |mask: u32, c: char| if m & mask != 0 { c } else { '-' };
            [
                bit(0o400, 'r'), bit(0o200, 'w'), bit(0o100, 'x'),
                bit(0o040, 'r'), bit(0o020, 'w'), bit(0o010, 'x'),
                bit(0o004, 'r'), bit(0o002, 'w'), bit(0o001, 'x'),
            ]
            .iter()
            .collect()
        }
        None => "---------".to_string(),
    }
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Permissions")]
    perms: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// List directory contents
pub async fn ls(path: &str, long: bool, all: bool, human: bool) -> CliResult<()> {
    tracing::debug!("Listing: {}", path);

    let mut entries = match classify(path).await? {
        AnyEntry::Directory(dir) => dir.children().await?,
        other => vec![other],
    };
    entries.retain(|e| all || !e.name().starts_with('.'));
    entries.sort_by(|a, b| a.name().cmp(&b.name()));

    if entries.is_empty() {
        println!("(empty directory)");
        return Ok(());
    }

    if long {
        // Dangling links and the like have no metadata to show
        let stats: Vec<Option<Metadata>> = join_all(entries.iter().map(|e| e.stat()))
            .await
            .into_iter()
            .map(Result::ok)
            .collect();

        let rows: Vec<LsEntry> = entries
            .iter()
            .zip(stats)
            .map(|(e, meta)| LsEntry {
                kind: format_kind(&e.kind()),
                perms: format_permissions(meta.as_ref().and_then(|m| m.mode)),
                size: format_size(meta.as_ref().map(|m| m.len), human),
                modified: format_time(meta.as_ref().and_then(|m| m.modified)),
                name: e.name().into_owned(),
            })
            .collect();

        println!("{}", Table::new(rows));
    } else {
        for e in &entries {
            println!("{}", e.name());
        }
    }

    Ok(())
}

/// Display file contents
pub async fn cat(path: &str) -> CliResult<()> {
    tracing::debug!("Reading: {}", path);

    let entry = classify(path).await?;
    let file = match entry.as_file() {
        Some(file) => file,
        None => return Err(CliError::NotAFile(entry.path().clone())),
    };

    let mut handle = file.open(&OpenOptions::new(OpenFlags::read())).await?;
    let mut stdout = tokio::io::stdout();
    tokio::io::copy(&mut handle, &mut stdout).await?;
    Ok(())
}

/// Where `mv source dest` lands: inside `dest` when it is a directory.
async fn move_target(source: &AnyEntry, dest: &str) -> EntryPath {
    let dest = EntryPath::new(dest);
    if Directory::new(dest.clone()).verify().await {
        dest.join(&*source.name())
    } else {
        dest
    }
}

/// Move/rename entries
pub async fn mv(source: &str, dest: &str) -> CliResult<()> {
    let mut entry = classify(source).await?;
    let target = move_target(&entry, dest).await;

    tracing::debug!("Moving: {} -> {}", entry.path(), target);
    entry.rename(target).await?;

    println!("Moved {} -> {}", source, entry.path());
    Ok(())
}

/// Remove files or directories
pub async fn rm(paths: &[String], recursive: bool) -> CliResult<()> {
    for path in paths {
        let entry = classify(path).await?;
        tracing::debug!("Removing: {} ({})", entry.path(), entry.kind());

        // A link to a directory is unlinked like any other link
        match entry.as_directory() {
            Some(dir) if !recursive && !dir.is_link().await? => dir.remove_empty().await?,
            _ => entry.remove().await?,
        }
        println!("Removed {}", path);
    }

    Ok(())
}

/// Create directories
pub async fn mkdir(paths: &[String], parents: bool, mode: Option<u32>) -> CliResult<()> {
    let options = MakeDirOptions { recursive: parents, mode };

    for path in paths {
        tracing::debug!("Creating directory: {}", path);
        Directory::make(path.as_str(), &options).await?;
        println!("Created {}", path);
    }

    Ok(())
}

#[derive(Serialize)]
struct StatReport {
    path: EntryPath,
    kind: EntryKind,
    metadata: Metadata,
}

/// Show entry kind and metadata
pub async fn stat(path: &str, json: bool) -> CliResult<()> {
    tracing::debug!("Getting info: {}", path);

    let entry = classify(path).await?;
    let report = StatReport {
        path: entry.path().clone(),
        kind: entry.kind(),
        metadata: entry.stat().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let meta = &report.metadata;
    println!("  Path: {}", report.path);
    println!("  Kind: {}", report.kind);
    println!("  Type: {:?}", meta.file_type);
    println!("  Size: {} ({})", meta.len, bytesize::ByteSize(meta.len));

    if let Some(mode) = meta.mode {
        println!("  Mode: {:o} ({})", mode, format_permissions(Some(mode)));
    }

    if let Some(modified) = meta.modified {
        println!("  Modified: {}", modified);
    }

    if let Some(accessed) = meta.accessed {
        println!("  Accessed: {}", accessed);
    }

    if let Some(created) = meta.created {
        println!("  Created: {}", created);
    }

    Ok(())
}
