//! Streaming substring search over an index file.
//!
//! The index is read line by line and never held in memory. Header
//! lines and blank lines are skipped, the first field of each data row
//! is unescaped and matched against the query, and the scan stops as
//! soon as the hit cap is reached.
//!
//! Known limitations:
//! - Case folding is ASCII-only: `É` and `é` are different bytes and do
//!   not match each other.
//! - Any line starting with `#` counts as a header, so a file at the
//!   volume root whose name starts with `#` is indexed but never found.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use memchr::memmem::Finder;

use crate::core::error::{Result, WiblError};
use crate::core::index::codec::unescape;
use crate::core::index::format::{trim_line_end, FIELD_DELIMITER, HEADER_PREFIX};
use crate::core::types::SearchResponse;

/// Maximum number of matches collected per query
pub const MAX_HITS: usize = 20_000;

/// Substring search over index files
#[derive(Debug, Clone)]
pub struct SearchEngine {
    max_hits: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(MAX_HITS)
    }
}

impl SearchEngine {
    /// Create a search engine stopping after `max_hits` matches
    pub fn new(max_hits: usize) -> Self {
        Self {
            max_hits: max_hits.max(1),
        }
    }

    pub fn max_hits(&self) -> usize {
        self.max_hits
    }

    /// Find relative paths in the index at `index_path` containing `text`
    ///
    /// With `only_filename`, only the part after the last `\` or `/` is
    /// matched. Results keep index order. Rows without a delimiter are
    /// skipped silently. An empty query matches every row.
    pub fn query(
        &self,
        index_path: &Path,
        text: &str,
        only_filename: bool,
    ) -> Result<SearchResponse> {
        let file = File::open(index_path)
            .map_err(|e| WiblError::CannotOpenIndex(format!("{}: {e}", index_path.display())))?;
        let mut reader = BufReader::new(file);

        let needle = text.as_bytes().to_ascii_lowercase();
        let finder = Finder::new(&needle);

        let mut response = SearchResponse::default();
        let mut buf = Vec::new();
        let mut subject = Vec::new();
        let mut rows_scanned: u64 = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = trim_line_end(&buf);
            if line.is_empty() || line[0] == HEADER_PREFIX {
                continue;
            }
            let Some(delimiter) = memchr::memchr(FIELD_DELIMITER, line) else {
                continue;
            };
            rows_scanned += 1;

            let rel_path = unescape(&line[..delimiter]);
            let hay = if only_filename {
                file_name(&rel_path)
            } else {
                &rel_path[..]
            };

            subject.clear();
            subject.extend(hay.iter().map(u8::to_ascii_lowercase));
            if finder.find(&subject).is_none() {
                continue;
            }

            response
                .matches
                .push(String::from_utf8_lossy(&rel_path).into_owned());
            response.hit_count += 1;
            if response.hit_count >= self.max_hits {
                response.capped = true;
                break;
            }
        }

        tracing::debug!(
            "Search for {:?} in {:?}: {} hits over {} rows{}",
            text,
            index_path,
            response.hit_count,
            rows_scanned,
            if response.capped { " (capped)" } else { "" }
        );

        Ok(response)
    }
}

/// Portion of a relative path after its last `\` or `/`
fn file_name(path: &[u8]) -> &[u8] {
    match memchr::memrchr2(b'\\', b'/', path) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Run a query with the default hit cap
pub fn query(index_path: &Path, text: &str, only_filename: bool) -> Result<SearchResponse> {
    SearchEngine::default().query(index_path, text, only_filename)
}
