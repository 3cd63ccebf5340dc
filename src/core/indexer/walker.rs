//! File system walker for volume indexing.
//!
//! Traverses the whole tree under a root and yields every regular
//! file, hidden and system entries included. Unreadable entries are
//! logged and skipped without stopping the walk.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use walkdir::{DirEntry, WalkDir};

use crate::core::index::format::PATH_SEPARATOR;

/// One file as recorded in an index row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedFile {
    /// Path relative to the walk root, `\`-separated
    pub rel_path: String,

    /// Size in bytes
    pub size: u64,

    /// Modification time in whole seconds since the Unix epoch
    pub mtime: i64,
}

/// Recursive walker over all regular files below a root
pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    /// Create a new file walker rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lazily iterate the regular files under the root
    ///
    /// Directories are descended but not yielded. Symlinks are not
    /// followed. Walk errors (permission denied, vanished entries) are
    /// logged and skipped.
    pub fn files(&self) -> impl Iterator<Item = DirEntry> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
    }

    /// Build the index record for a walked file
    ///
    /// Returns `None` when the file's metadata can no longer be read.
    pub fn describe(&self, entry: &DirEntry) -> Option<IndexedFile> {
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", entry.path(), e);
                return None;
            }
        };

        let mtime = metadata.modified().map(unix_seconds).unwrap_or(0);

        Some(IndexedFile {
            rel_path: relative_path(&self.root, entry.path()),
            size: metadata.len(),
            mtime,
        })
    }
}

/// Express `path` relative to `root` with `\` between components
///
/// Both `/` and `\` in the platform path end up as the canonical
/// separator. Non-UTF-8 names are converted lossily.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::new();
    for component in rel.components() {
        if !out.is_empty() {
            out.push(PATH_SEPARATOR);
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out.replace('/', "\\")
}

/// Seconds since the epoch, truncated toward zero
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}
