//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Arc<Services> wrappers matching CLI execute() signatures
//! - Index files built through the index command

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use wibl::cli::commands::index::{execute, IndexArgs};
use wibl::cli::OutputFormat;
use wibl::core::services::Services;

/// Create test services wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_services() -> (Arc<Services>, TempDir) {
    let (services, temp_dir) = crate::common::test_services();
    (Arc::new(services), temp_dir)
}

/// Index arguments for `path` with everything else at its default
pub fn index_args(path: &Path, output: Option<PathBuf>) -> IndexArgs {
    IndexArgs {
        path: path.to_path_buf(),
        output,
        label: Some("TESTVOL".to_string()),
        serial: 42,
        fs_name: "tmpfs".to_string(),
        keep_partial: false,
        quiet: true,
    }
}

/// Index `volume_root` through the CLI and return the index path
pub async fn setup_index(services: &Arc<Services>, volume_root: &Path, out: &Path) -> PathBuf {
    let index = out.join("cli.wibl");
    execute(
        index_args(volume_root, Some(index.clone())),
        services,
        OutputFormat::Json,
    )
    .await
    .expect("Failed to index test volume");
    index
}
