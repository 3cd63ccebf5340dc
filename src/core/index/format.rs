//! On-disk index layout.
//!
//! An index file is UTF-8 text, one record per line, fields separated
//! by tabs:
//!
//! ```text
//! #WHEREISBYLABELQT\t1
//! #DISK_LABEL\t<escaped label>
//! #DISK_SERIAL\t<decimal u32>
//! #DISK_FS\t<escaped filesystem name>
//! #DISK_ROOT\t<escaped root, trailing separator included>
//! #COLUMNS\tREL_PATH\tSIZE\tMTIME_UNIX
//! <escaped relative path>\t<size>\t<mtime>
//! ```
//!
//! Data rows follow traversal order. Only text fields go through the
//! codec; numeric fields are plain decimal.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Serialize;

use crate::core::error::{Result, WiblError};
use crate::core::index::codec::{escape, unescape_str};
use crate::core::types::VolumeInfo;

/// Format marker written on the first header line
pub const FORMAT_MARKER: &str = "#WHEREISBYLABELQT";

/// Current format version
pub const FORMAT_VERSION: u32 = 1;

/// Prefix shared by all header lines
pub const HEADER_PREFIX: u8 = b'#';

/// Field delimiter
pub const FIELD_DELIMITER: u8 = b'\t';

/// Canonical separator inside relative paths
pub const PATH_SEPARATOR: char = '\\';

/// Number of header lines at the top of every index
pub const HEADER_LINES: usize = 6;

const KEY_LABEL: &str = "#DISK_LABEL";
const KEY_SERIAL: &str = "#DISK_SERIAL";
const KEY_FS: &str = "#DISK_FS";
const KEY_ROOT: &str = "#DISK_ROOT";
const COLUMNS_LINE: &[u8] = b"#COLUMNS\tREL_PATH\tSIZE\tMTIME_UNIX";

/// Write one raw line followed by a single line feed
fn write_line<W: Write>(out: &mut W, line: &[u8]) -> std::io::Result<()> {
    out.write_all(line)?;
    out.write_all(b"\n")
}

fn keyed_line(key: &str, value: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(key.len() + 1 + value.len());
    line.extend_from_slice(key.as_bytes());
    line.push(FIELD_DELIMITER);
    line.extend_from_slice(value);
    line
}

/// Write the six header lines in their fixed order
///
/// `root` must already carry its trailing separator.
pub fn write_header<W: Write>(
    out: &mut W,
    volume: &VolumeInfo,
    root: &str,
) -> std::io::Result<()> {
    write_line(out, format!("{FORMAT_MARKER}\t{FORMAT_VERSION}").as_bytes())?;
    write_line(out, &keyed_line(KEY_LABEL, &escape(volume.label.as_bytes())))?;
    write_line(out, &keyed_line(KEY_SERIAL, volume.serial.to_string().as_bytes()))?;
    write_line(out, &keyed_line(KEY_FS, &escape(volume.fs_name.as_bytes())))?;
    write_line(out, &keyed_line(KEY_ROOT, &escape(root.as_bytes())))?;
    write_line(out, COLUMNS_LINE)
}

/// Write one data row: `escape(rel_path)\tsize\tmtime`
pub fn write_row<W: Write>(
    out: &mut W,
    rel_path: &str,
    size: u64,
    mtime: i64,
) -> std::io::Result<()> {
    let mut line = escape(rel_path.as_bytes());
    line.push(FIELD_DELIMITER);
    line.extend_from_slice(size.to_string().as_bytes());
    line.push(FIELD_DELIMITER);
    line.extend_from_slice(mtime.to_string().as_bytes());
    write_line(out, &line)
}

/// Volume metadata recovered from an index header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexHeader {
    pub version: u32,
    pub label: String,
    pub serial: u32,
    pub fs_name: String,
    pub root: String,
}

impl IndexHeader {
    /// Read and parse the header of the index at `path`
    ///
    /// Data rows are not touched. Unlike search, this validates the
    /// marker and key order.
    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| WiblError::CannotOpenIndex(format!("{}: {e}", path.display())))?;
        let mut reader = BufReader::new(file);

        let mut lines = Vec::with_capacity(HEADER_LINES);
        let mut buf = Vec::new();
        while lines.len() < HEADER_LINES {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            lines.push(trim_line_end(&buf).to_vec());
        }
        Self::parse(&lines)
    }

    fn parse(lines: &[Vec<u8>]) -> Result<Self> {
        if lines.len() < HEADER_LINES {
            return Err(WiblError::InvalidIndex(format!(
                "expected {HEADER_LINES} header lines, found {}",
                lines.len()
            )));
        }

        let version = header_value(&lines[0], FORMAT_MARKER)?;
        let version = std::str::from_utf8(version)
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| WiblError::InvalidIndex("unreadable format version".to_string()))?;

        let label = unescape_str(header_value(&lines[1], KEY_LABEL)?);
        let serial = std::str::from_utf8(header_value(&lines[2], KEY_SERIAL)?)
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| WiblError::InvalidIndex("unreadable disk serial".to_string()))?;
        let fs_name = unescape_str(header_value(&lines[3], KEY_FS)?);
        let root = unescape_str(header_value(&lines[4], KEY_ROOT)?);

        if lines[5] != COLUMNS_LINE {
            return Err(WiblError::InvalidIndex(
                "unexpected column declaration".to_string(),
            ));
        }

        Ok(Self {
            version,
            label,
            serial,
            fs_name,
            root,
        })
    }

    /// Join a relative path from this index onto the recorded root
    pub fn absolute_path(&self, rel_path: &str) -> String {
        let rel = rel_path.replace(PATH_SEPARATOR, std::path::MAIN_SEPARATOR_STR);
        format!("{}{}", self.root, rel)
    }
}

fn header_value<'a>(line: &'a [u8], key: &str) -> Result<&'a [u8]> {
    line.strip_prefix(key.as_bytes())
        .and_then(|rest| rest.strip_prefix(&[FIELD_DELIMITER]))
        .ok_or_else(|| WiblError::InvalidIndex(format!("missing {key} header line")))
}

/// Strip the line feed and an optional preceding carriage return
///
/// Escaped fields never contain a raw `\r`, so a trailing one can only
/// come from a CRLF line ending.
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
