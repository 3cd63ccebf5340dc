//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub index_dir: String,
    pub progress_interval: u64,
    pub max_hits: usize,
    pub only_filename: bool,
}

/// Execute the config command
pub async fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        index_dir: config.storage.index_dir.to_string_lossy().into_owned(),
        progress_interval: config.indexing.progress_interval,
        max_hits: config.search.max_hits,
        only_filename: config.search.only_filename,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  storage:");
            println!("    index_dir: {}", response.index_dir);
            println!("  indexing:");
            println!("    progress_interval: {}", response.progress_interval);
            println!("  search:");
            println!("    max_hits: {}", response.max_hits);
            println!("    only_filename: {}", response.only_filename);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
