//! The `vars.properties` line format.
//!
//! ```text
//! # comments and blank lines are ignored on read
//! key=value with\nescaped line breaks
//! ```
//!
//! Only `\n` and `\r` are escaped. A value that already contains a literal backslash
//! followed by `n` or `r` reads back as a line break; the on-disk format keeps that
//! limitation for compatibility with existing files.

use std::collections::BTreeMap;

/// Replaces line breaks with their two-character escape sequences.
#[must_use]
pub fn escape(value: &str) -> String {
    value.replace('\n', "\\n").replace('\r', "\\r")
}

/// Reverses [`escape`].
#[must_use]
pub fn unescape(raw: &str) -> String {
    raw.replace("\\n", "\n").replace("\\r", "\r")
}

/// Parses a property file into a map.
///
/// Lines that are blank, start with `#` (after leading whitespace) or contain no `=` are
/// skipped. The line is split on the first `=`; key and value are trimmed and the value
/// is unescaped. When a key repeats, the last occurrence wins.
#[must_use]
pub fn parse(input: &str) -> BTreeMap<String, String> {
    input.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim().to_owned(), unescape(value.trim())))
}

/// Serializes a map as one `key=escaped_value` line per entry, in key order.
#[must_use]
pub fn serialize(data: &BTreeMap<String, String>) -> String {
    let capacity = data.iter().map(|(k, v)| k.len() + v.len() + 2).sum();
    let mut out = String::with_capacity(capacity);

    for (key, value) in data {
        out.push_str(key);
        out.push('=');
        out.push_str(&escape(value));
        out.push('\n');
    }

    out
}
