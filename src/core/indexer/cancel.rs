//! Cooperative cancellation for indexing jobs.
//!
//! The controller requests, the worker observes. The flag belongs to a
//! single worker and is reset whenever a new job is started.

use std::sync::atomic::{AtomicBool, Ordering};

/// Atomic request/observe pair shared between controller and worker
#[derive(Debug, Default)]
pub struct CancelFlag {
    requested: AtomicBool,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the running job to stop at its next check
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested since the last reset
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Clear any pending request before a new job starts
    pub fn reset(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }
}
