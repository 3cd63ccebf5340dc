//! Tests for the info and show-config CLI commands

use crate::cli::test_helpers::{create_cli_test_services, setup_index};
use crate::common::TestVolume;
use wibl::cli::commands::config::{self, ConfigArgs};
use wibl::cli::commands::info::{execute, InfoArgs};
use wibl::cli::OutputFormat;

/// Test info output for a freshly built index
#[tokio::test]
async fn test_info_human_and_json() {
    let (services, _storage_temp) = create_cli_test_services();
    let volume = TestVolume::small();
    let out = tempfile::tempdir().unwrap();
    let index = setup_index(&services, volume.path(), out.path()).await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(InfoArgs { index: index.clone() }, format).await;
        assert!(result.is_ok(), "Info should succeed: {:?}", result.err());
    }
}

/// Test info on a file that is not an index
#[tokio::test]
async fn test_info_rejects_non_index() {
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("plain.txt");
    std::fs::write(&path, "hello\n").unwrap();

    let result = execute(InfoArgs { index: path }, OutputFormat::Human).await;
    assert!(result.is_err());
}

/// Test show-config in both formats
#[tokio::test]
async fn test_show_config() {
    let (services, _storage_temp) = create_cli_test_services();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = config::execute(ConfigArgs {}, &services, format).await;
        assert!(result.is_ok());
    }
}
