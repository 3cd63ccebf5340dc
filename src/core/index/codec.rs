//! Backslash escaping for tab-delimited index fields.
//!
//! Structural bytes (tab, line feed, carriage return) and the escape
//! byte itself are replaced by two-byte sequences so a field can never
//! split a row. Every other byte, including multi-byte UTF-8
//! sequences, passes through untouched.
//!
//! `unescape(&escape(x)) == x` holds for every byte string `x`.

/// Escape a raw field for writing into an index line
pub fn escape(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(b),
        }
    }
    out
}

/// Reverse [`escape`]
///
/// A backslash followed by anything other than `\`, `t`, `n` or `r`
/// is copied through as-is, as is a lone backslash at the very end of
/// the input. Decoding never fails.
pub fn unescape(escaped: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(escaped.len());
    let mut i = 0;
    while i < escaped.len() {
        let b = escaped[i];
        if b == b'\\' {
            let decoded = match escaped.get(i + 1) {
                Some(b'\\') => Some(b'\\'),
                Some(b't') => Some(b'\t'),
                Some(b'n') => Some(b'\n'),
                Some(b'r') => Some(b'\r'),
                _ => None,
            };
            if let Some(d) = decoded {
                out.push(d);
                i += 2;
                continue;
            }
        }
        out.push(b);
        i += 1;
    }
    out
}

/// Unescape a field into text, replacing invalid UTF-8 lossily
pub fn unescape_str(escaped: &[u8]) -> String {
    String::from_utf8_lossy(&unescape(escaped)).into_owned()
}
