//! CLI adapter for wibl
//!
//! Command-line front end over `core/`: builds index files from a
//! directory and searches them.
//!
//! ```text
//!   wibl index /mnt/usb --label USB -o usb.wibl
//!            |
//!            v
//!   core::indexer (background worker) --> usb.wibl
//!                                            |
//!   wibl search report -x usb.wibl           v
//!            +-------------------> core::search
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// wibl - search file paths of indexed volumes offline
///
/// Index a volume once, then search its file paths without the volume
/// being mounted.
#[derive(Parser, Debug)]
#[command(name = "wibl")]
#[command(version)]
#[command(about = "Offline file-path index for storage volumes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index every file below a volume root
    Index(commands::IndexArgs),

    /// Search an index file for paths containing a substring
    Search(commands::SearchArgs),

    /// Show the volume recorded in an index file
    Info(commands::InfoArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  wibl completions bash > ~/.local/share/bash-completion/completions/wibl
    ///   zsh:   wibl completions zsh > ~/.zfunc/_wibl
    ///   fish:  wibl completions fish > ~/.config/fish/completions/wibl.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Commands that need no configuration
    match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        Commands::Info(args) => return commands::info::execute(args, cli.format).await,
        _ => {}
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let services = Arc::new(Services::new(config));

    match cli.command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format).await,
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) | Commands::Info(_) => unreachable!(), // Handled above
    }
}
