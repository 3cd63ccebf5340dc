//! Search module for substring queries over index files.
//!
//! Queries stream the index from disk and never modify it.

mod engine;

pub use engine::{query, SearchEngine, MAX_HITS};
