// Test helper functions

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wibl::core::indexer::{CancelFlag, IndexBuilder};
use wibl::{Config, IndexEvent, IndexStats, Services, VolumeInfo};

/// Create services whose default index directory is a temp dir
#[allow(dead_code)] // Used in integration tests
pub fn test_services() -> (Services, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.index_dir = temp_dir.path().to_path_buf();
    (Services::new(config), temp_dir)
}

/// Index `volume` into a fresh temp dir, returning the index path
#[allow(dead_code)] // Used in integration tests
pub fn build_index(volume: &VolumeInfo) -> (TempDir, PathBuf, IndexStats, Vec<IndexEvent>) {
    let out = TempDir::new().expect("Failed to create temp dir");
    let path = out.path().join("test.wibl");
    let mut events = Vec::new();

    let stats = IndexBuilder::default()
        .run(volume, &path, &CancelFlag::new(), |e| events.push(e))
        .expect("Indexing failed");

    (out, path, stats, events)
}

/// Lines of the index that are not header lines
#[allow(dead_code)] // Used in integration tests
pub fn data_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read index")
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Header lines of the index
#[allow(dead_code)] // Used in integration tests
pub fn header_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read index")
        .lines()
        .filter(|l| l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
