//! Indexer layer tests
//!
//! Full builds over synthetic trees and cooperative cancellation.

mod test_build;
mod test_cancel;
