//! Index format tests
//!
//! Header fields, escaping of unusual names, and UTF-8 paths as they
//! land on disk.
