//! Core domain logic (front-end agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Volume, event and result structures
//! - **xdg**: XDG directory handling
//! - **index**: Index file format and field codec
//! - **indexer**: Volume walk, builder and background worker
//! - **search**: Streaming substring search
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod index;
pub mod indexer;
pub mod search;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, WiblError};
pub use services::Services;
