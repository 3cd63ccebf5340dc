//! wibl - offline file-path index for storage volumes
//!
//! Walks every file on a volume once and writes a line-oriented index
//! file, so later substring searches over file paths never need the
//! volume itself.
//!
//! # Architecture
//!
//! - **core**: Domain logic (front-end agnostic)
//!   - index (file format, field escaping)
//!   - indexer (walk, builder, cancellable background worker)
//!   - search (streaming substring search with a hit cap)
//!   - config, error, types, xdg, services
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Index file
//!
//! Six `#`-prefixed header lines describing the volume, then one
//! `relative path \t size \t mtime` row per file. Text fields are
//! backslash-escaped so no field can contain a tab or line break.

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{Result, WiblError};
pub use core::services::Services;
pub use core::types::*;
