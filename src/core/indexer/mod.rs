//! Volume indexing module.
//!
//! Walks a volume and writes its index file. Key pieces:
//!
//! - Recursive walk over every regular file, hidden ones included
//! - Cooperative cancellation checked once per file
//! - A dedicated background worker reporting events over a channel

pub mod builder;
pub mod cancel;
pub mod walker;
pub mod worker;

pub use builder::{IndexBuilder, PROGRESS_INTERVAL};
pub use cancel::CancelFlag;
pub use walker::{FileWalker, IndexedFile};
pub use worker::{IndexEvents, IndexWorker, JobState};
