//! Index command - index a volume (or any directory) into an index file

use crate::cli::output::{colors, format_duration, print_warning};
use crate::cli::OutputFormat;
use crate::core::indexer::JobState;
use crate::core::services::Services;
use crate::core::types::{IndexEvent, VolumeInfo};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Root of the volume to index
    pub path: PathBuf,

    /// Index file to write (default: <index_dir>/<label>.wibl)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Volume label (default: the root directory's name)
    #[arg(long, short = 'l')]
    pub label: Option<String>,

    /// Volume serial number
    #[arg(long, default_value = "0")]
    pub serial: u32,

    /// Filesystem name recorded in the header
    #[arg(long, default_value = "unknown")]
    pub fs_name: String,

    /// Keep the partially written index when the job is canceled
    #[arg(long)]
    pub keep_partial: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub label: String,
    pub root: String,
    pub output: String,
    pub files_indexed: u64,
    pub duration_secs: f64,
}

/// Build the volume description for a directory argument
///
/// A path that is missing or not a directory yields an invalid volume,
/// which the indexing job then rejects.
pub fn volume_for_path(
    path: &Path,
    label: Option<String>,
    serial: u32,
    fs_name: &str,
) -> VolumeInfo {
    let root = match path.canonicalize() {
        Ok(root) if root.is_dir() => root,
        _ => return VolumeInfo::invalid(path.to_string_lossy()),
    };

    let label = label.unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    });

    VolumeInfo::new(root.to_string_lossy(), label, serial, fs_name)
}

/// File name for an index written without an explicit output path
pub fn default_index_name(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "volume".to_string() } else { stem };
    format!("{stem}.wibl")
}

/// Deal with the index file left behind by a job that did not succeed
///
/// A canceled job's file is removed unless `keep_partial` is set. Files
/// of jobs that failed for any other reason are left alone. Returns
/// whether a canceled job's partial file was found.
pub fn handle_partial_output(
    output: &Path,
    state: JobState,
    keep_partial: bool,
) -> crate::core::error::Result<bool> {
    if state != JobState::Canceled || !output.exists() {
        return Ok(false);
    }
    if !keep_partial {
        fs::remove_file(output)?;
        tracing::info!("Removed partial index {:?}", output);
    }
    Ok(true)
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let volume = volume_for_path(&args.path, args.label, args.serial, &args.fs_name);

    let output = match args.output {
        Some(output) => output,
        None => {
            let dir = &services.config.storage.index_dir;
            fs::create_dir_all(dir)?;
            dir.join(default_index_name(&volume.label))
        }
    };

    let show_progress = !args.quiet && format == OutputFormat::Human;
    let start = Instant::now();

    let (worker, mut events) = services.spawn_worker()?;
    worker.start(volume.clone(), output.clone())?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancel_sent = false;
    let mut files_indexed = 0;

    let (ok, message) = loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(IndexEvent::Started { message }) => {
                    if show_progress {
                        eprintln!("{}", colors::dim(&message));
                    }
                }
                Some(IndexEvent::Progress { files }) => {
                    files_indexed = files;
                    if show_progress {
                        eprintln!("Indexing... {} files", colors::number(&files.to_string()));
                    }
                }
                Some(IndexEvent::Finished { ok, message }) => break (ok, message),
                None => return Err("Indexing worker stopped unexpectedly".into()),
            },
            _ = &mut ctrl_c, if !cancel_sent => {
                cancel_sent = true;
                worker.cancel();
                if show_progress {
                    eprintln!("{}", colors::warning("Cancel requested..."));
                }
            }
        }
    };

    if !ok {
        let partial = handle_partial_output(&output, worker.state(), args.keep_partial)?;
        if partial && args.keep_partial {
            print_warning(&format!("Partial index kept at {}", output.display()));
        }
        return Err(message.into());
    }

    let response = IndexResponse {
        label: volume.label.clone(),
        root: volume.normalized_root(),
        output: output.to_string_lossy().into_owned(),
        files_indexed,
        duration_secs: start.elapsed().as_secs_f64(),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} files from {} in {}",
                colors::success("Indexed"),
                colors::number(&response.files_indexed.to_string()),
                colors::file_path(&response.root),
                colors::number(&format_duration(response.duration_secs))
            );
            println!("Index file: {}", colors::file_path(&response.output));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
