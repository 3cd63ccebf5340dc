//! Unified service container for wibl
//!
//! Provides shared access to configuration and the search engine, and
//! builds indexing workers configured the same way.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::{IndexBuilder, IndexEvents, IndexWorker};
use crate::core::search::SearchEngine;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Search engine with the configured hit cap
    pub search: Arc<SearchEngine>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let search = Arc::new(SearchEngine::new(config.search.max_hits));

        Self {
            search,
            config: Arc::new(config),
        }
    }

    /// Index builder using the configured progress interval
    pub fn builder(&self) -> IndexBuilder {
        IndexBuilder::new(self.config.indexing.progress_interval)
    }

    /// Spawn a background worker for one or more indexing jobs
    pub fn spawn_worker(&self) -> Result<(IndexWorker, IndexEvents)> {
        IndexWorker::spawn(self.builder())
    }
}
