//! Index file format.
//!
//! - **codec**: escape/unescape for tab-delimited fields
//! - **format**: header and row layout, header reader

pub mod codec;
pub mod format;

pub use codec::{escape, unescape, unescape_str};
pub use format::IndexHeader;
