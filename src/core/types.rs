//! Core data types for wibl.
//!
//! This module defines the data structures passed between the
//! indexer, the search engine and their callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing the volume being indexed
///
/// Produced by volume discovery (or built from CLI arguments) and
/// never mutated by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    /// Root path of the volume, e.g. `E:\` or `/mnt/usb`
    pub root: String,

    /// Volume label
    pub label: String,

    /// 32-bit volume serial number
    pub serial: u32,

    /// Filesystem name, e.g. `NTFS`
    pub fs_name: String,

    /// Whether discovery produced usable metadata
    pub ok: bool,
}

impl VolumeInfo {
    /// Create a valid volume description
    pub fn new(
        root: impl Into<String>,
        label: impl Into<String>,
        serial: u32,
        fs_name: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            label: label.into(),
            serial,
            fs_name: fs_name.into(),
            ok: true,
        }
    }

    /// Create a volume description that failed discovery
    pub fn invalid(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            label: String::new(),
            serial: 0,
            fs_name: String::new(),
            ok: false,
        }
    }

    /// Root path with a trailing separator appended when missing
    pub fn normalized_root(&self) -> String {
        let mut root = self.root.clone();
        if !root.ends_with('\\') && !root.ends_with('/') {
            root.push(std::path::MAIN_SEPARATOR);
        }
        root
    }
}

/// Notification emitted by an indexing job, in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum IndexEvent {
    Started { message: String },
    Progress { files: u64 },
    Finished { ok: bool, message: String },
}

/// Statistics from a completed indexing job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of data rows written
    pub files_indexed: u64,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,

    /// When the job finished
    pub finished_at: DateTime<Utc>,
}

/// Result of a search over one index file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching relative paths, in index order
    pub matches: Vec<String>,

    /// Number of entries in `matches`
    pub hit_count: usize,

    /// True when the hit cap stopped the scan; more rows may match
    pub capped: bool,
}
