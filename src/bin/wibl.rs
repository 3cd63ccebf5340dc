//! wibl CLI - index volumes and search their file paths offline
//!
//! # Examples
//!
//! ```bash
//! # Index a mounted volume
//! wibl index /mnt/usb --label BACKUP --fs-name exfat -o backup.wibl
//!
//! # Search the index (volume no longer needed)
//! wibl search invoice -x backup.wibl --only-filename
//!
//! # Show the volume recorded in an index
//! wibl info backup.wibl
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wibl::cli::output::print_error;
use wibl::cli::{run, Cli};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "wibl=debug" } else { "wibl=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr) // stdout carries results
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
