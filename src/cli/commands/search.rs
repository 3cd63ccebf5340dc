//! Search command - find indexed files by path substring

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::error::WiblError;
use crate::core::index::IndexHeader;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive substring)
    pub query: String,

    /// Index file to search
    #[arg(long, short = 'x')]
    pub index: PathBuf,

    /// Match against file names only, not directories
    #[arg(long, short = 'n')]
    pub only_filename: bool,

    /// Match against the whole relative path, overriding the config
    #[arg(long, short = 'p', conflicts_with = "only_filename")]
    pub full_path: bool,

    /// Print full paths under the indexed root
    #[arg(long, short = 'a')]
    pub absolute: bool,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub index: String,
    pub only_filename: bool,
    pub hit_count: usize,
    pub capped: bool,
    pub matches: Vec<String>,
}

impl SearchArgs {
    /// Matching mode after applying the flags to the configured default
    pub fn resolve_only_filename(&self, configured: bool) -> bool {
        if self.full_path {
            false
        } else {
            self.only_filename || configured
        }
    }
}

/// Run a search and collect its output without printing
pub fn search(
    args: &SearchArgs,
    services: &Services,
) -> Result<SearchOutput, Box<dyn std::error::Error>> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(WiblError::InvalidQuery("type something to search for".to_string()).into());
    }

    let only_filename = args.resolve_only_filename(services.config.search.only_filename);
    let response = services.search.query(&args.index, query, only_filename)?;

    let matches = if args.absolute {
        let header = IndexHeader::read_from(&args.index)?;
        response
            .matches
            .iter()
            .map(|rel| header.absolute_path(rel))
            .collect()
    } else {
        response.matches
    };

    Ok(SearchOutput {
        query: query.to_string(),
        index: args.index.to_string_lossy().into_owned(),
        only_filename,
        hit_count: response.hit_count,
        capped: response.capped,
        matches,
    })
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = search(&args, services)?;

    match format {
        OutputFormat::Human => {
            for path in &output.matches {
                println!("{}", colors::file_path(path));
            }
            if !output.matches.is_empty() {
                println!();
            }
            println!("Hits: {}", colors::number(&output.hit_count.to_string()));
            if output.capped {
                println!(
                    "{}",
                    colors::warning(&format!(
                        "Stopped after {} hits; refine the query to see the rest.",
                        services.search.max_hits()
                    ))
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
