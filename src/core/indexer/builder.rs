//! Index builder.
//!
//! Runs one indexing job to completion on the calling thread:
//! 1. Validate the volume
//! 2. Open the destination for truncating write
//! 3. Write the header
//! 4. Walk the volume and append one row per file
//!
//! Every job reports exactly one `Finished` event, whatever the outcome.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use crate::core::error::{Result, WiblError};
use crate::core::index::format::{write_header, write_row};
use crate::core::indexer::{CancelFlag, FileWalker};
use crate::core::types::{IndexEvent, IndexStats, VolumeInfo};

/// Files between two progress events
pub const PROGRESS_INTERVAL: u64 = 2000;

/// Builds an index file for a single volume
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    progress_interval: u64,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(PROGRESS_INTERVAL)
    }
}

impl IndexBuilder {
    /// Create a builder emitting progress every `progress_interval` files
    pub fn new(progress_interval: u64) -> Self {
        Self {
            progress_interval: progress_interval.max(1),
        }
    }

    /// Index `volume` into `destination`
    ///
    /// Events are passed to `emit` in order. The returned result
    /// mirrors the final `Finished` event. On cancellation or a write
    /// failure, rows written so far stay on disk.
    pub fn run<F>(
        &self,
        volume: &VolumeInfo,
        destination: &Path,
        cancel: &CancelFlag,
        mut emit: F,
    ) -> Result<IndexStats>
    where
        F: FnMut(IndexEvent),
    {
        let result = self.build(volume, destination, cancel, &mut emit);

        let (ok, message) = match &result {
            Ok(stats) => (true, format!("Done. Files indexed: {}", stats.files_indexed)),
            Err(e) => (false, e.message()),
        };
        match &result {
            Ok(stats) => tracing::info!(
                "Indexed {} files from {} in {}ms",
                stats.files_indexed,
                volume.root,
                stats.duration_ms
            ),
            Err(WiblError::Canceled) => tracing::info!("Indexing of {} canceled", volume.root),
            Err(e) => tracing::warn!("Indexing of {} failed: {}", volume.root, e),
        }
        emit(IndexEvent::Finished { ok, message });

        result
    }

    fn build<F>(
        &self,
        volume: &VolumeInfo,
        destination: &Path,
        cancel: &CancelFlag,
        emit: &mut F,
    ) -> Result<IndexStats>
    where
        F: FnMut(IndexEvent),
    {
        let start = Instant::now();

        if !volume.ok {
            return Err(WiblError::InvalidVolume);
        }

        let root = volume.normalized_root();
        emit(IndexEvent::Started {
            message: format!("Indexing {} ({}) ...", root, volume.label),
        });

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(destination)
            .map_err(|e| {
                WiblError::CannotOpenOutput(format!("{}: {e}", destination.display()))
            })?;
        let mut out = BufWriter::new(file);

        write_header(&mut out, volume, &root).map_err(write_failed)?;

        let walker = FileWalker::new(&root);
        let mut count: u64 = 0;

        for entry in walker.files() {
            if cancel.is_requested() {
                out.flush().map_err(write_failed)?;
                tracing::debug!("Cancel observed after {} files", count);
                return Err(WiblError::Canceled);
            }

            let Some(file) = walker.describe(&entry) else {
                continue;
            };
            write_row(&mut out, &file.rel_path, file.size, file.mtime).map_err(write_failed)?;

            count += 1;
            if count % self.progress_interval == 0 {
                emit(IndexEvent::Progress { files: count });
            }
        }

        out.flush().map_err(write_failed)?;
        emit(IndexEvent::Progress { files: count });

        Ok(IndexStats {
            files_indexed: count,
            duration_ms: start.elapsed().as_millis() as u64,
            finished_at: Utc::now(),
        })
    }
}

fn write_failed(e: std::io::Error) -> WiblError {
    WiblError::IndexWriteFailed(e.to_string())
}
