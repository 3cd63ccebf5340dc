// Test fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wibl::VolumeInfo;

/// Synthetic volume: a temp directory tree plus the metadata describing it
#[allow(dead_code)] // Used in integration tests
pub struct TestVolume {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestVolume {
    /// Create a volume containing the given relative paths
    #[allow(dead_code)] // Used in integration tests
    pub fn with_files(files: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut created = Vec::new();

        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create directories");
            }
            fs::write(&path, file.as_bytes()).expect("Failed to write file");
            created.push(path);
        }

        Self {
            dir,
            files: created,
        }
    }

    /// Create a volume with `n` numbered files spread over ten directories
    #[allow(dead_code)] // Used in integration tests
    pub fn numbered(n: usize) -> Self {
        let names: Vec<String> = (0..n)
            .map(|i| format!("dir{}/file{i:05}.dat", i % 10))
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::with_files(&refs)
    }

    /// A small tree resembling a user's backup disk
    #[allow(dead_code)] // Used in integration tests
    pub fn small() -> Self {
        Self::with_files(&[
            "docs/report.txt",
            "docs/Report-2023.pdf",
            "docs/notes/meeting.md",
            "photos/2019/beach.jpg",
            "photos/2019/report-card.png",
            "music/song.mp3",
            ".hidden/config",
            "README",
        ])
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Metadata for this tree
    #[allow(dead_code)] // Used in integration tests
    pub fn info(&self) -> VolumeInfo {
        VolumeInfo::new(self.path().to_string_lossy(), "TESTVOL", 0xCAFE_BABE, "tmpfs")
    }
}
