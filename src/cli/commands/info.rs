//! Info command - show the volume recorded in an index file

use crate::cli::output::{colors, format_bytes};
use crate::cli::OutputFormat;
use crate::core::index::IndexHeader;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Index file to inspect
    pub index: PathBuf,
}

/// Index information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub index: String,
    pub size_bytes: u64,
    #[serde(flatten)]
    pub header: IndexHeader,
}

/// Execute the info command
pub async fn execute(
    args: InfoArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let header = IndexHeader::read_from(&args.index)?;
    let size_bytes = fs::metadata(&args.index)?.len();

    let info = InfoResponse {
        index: args.index.to_string_lossy().into_owned(),
        size_bytes,
        header,
    };

    match format {
        OutputFormat::Human => {
            let label = if info.header.label.is_empty() {
                "(no label)"
            } else {
                info.header.label.as_str()
            };
            println!("{}", colors::label(&info.index));
            println!("  Label:      {}", colors::volume_label(label));
            println!("  Serial:     {}", colors::number(&info.header.serial.to_string()));
            println!("  Filesystem: {}", info.header.fs_name);
            println!("  Root:       {}", colors::file_path(&info.header.root));
            println!("  Format:     v{}", info.header.version);
            println!("  Size:       {}", format_bytes(info.size_bytes));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
