//! Field codec for the unitsv line format.
//!
//! A line is split on raw tab characters first; each resulting field is then
//! unescaped on its own. Only three escapes exist: `\t`, `\n` and `\\`. Any
//! other character after a backslash, or a backslash ending the field, is an
//! error. Writing applies the inverse, so produced fields never contain a raw
//! tab or newline.

use std::borrow::Cow;

use crate::error::EscapeError;

pub const FIELD_SEPARATOR: char = '\t';
pub const ROW_TERMINATOR: char = '\n';

/// Splits a line (without its terminator) into unescaped fields.
///
/// An empty line yields a single empty field.
pub fn split_fields(line: &str) -> Result<Vec<String>, EscapeError> {
    line.split(FIELD_SEPARATOR)
        .enumerate()
        .map(|(idx, raw)| unescape_indexed(raw, idx))
        .collect()
}

/// Decodes a single raw field.
pub fn unescape_field(raw: &str) -> Result<String, EscapeError> {
    unescape_indexed(raw, 0)
}

fn unescape_indexed(raw: &str, field: usize) -> Result<String, EscapeError> {
    let mut decoded = String::with_capacity(raw.len());
    let mut escaped = false;
    for ch in raw.chars() {
        if !escaped {
            if ch == '\\' {
                escaped = true;
            } else {
                decoded.push(ch);
            }
            continue;
        }
        match ch {
            't' => decoded.push('\t'),
            'n' => decoded.push('\n'),
            '\\' => decoded.push('\\'),
            other => return Err(EscapeError::InvalidSequence { field, found: other }),
        }
        escaped = false;
    }
    if escaped {
        return Err(EscapeError::TrailingBackslash { field });
    }
    Ok(decoded)
}

/// Escapes tab, newline and backslash. Borrows when nothing needs escaping.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if !value.contains(['\t', '\n', '\\']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\\' => escaped.push_str("\\\\"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Escapes and tab-joins a row. No terminator is appended.
pub fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(&escape_field(field.as_ref()));
    }
    line
}
