//! Error types shared by the reader, writer and field codec.

use std::io;

use thiserror::Error;

/// A backslash sequence that could not be decoded.
///
/// `field` is the zero-based position of the offending field within its line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("invalid escape sequence '\\{found}' in field {field}")]
    InvalidSequence { field: usize, found: char },
    #[error("trailing backslash in field {field}")]
    TrailingBackslash { field: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed escape on line {line}: {source}")]
    MalformedEscape {
        line: usize,
        #[source]
        source: EscapeError,
    },
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("line {line} has {found} field(s) but the header has {expected}")]
    ShapeMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid row length: expected {expected} field(s), got {found}")]
    InvalidRowLength { expected: usize, found: usize },
    #[error("line {line} is not valid {encoding}")]
    Decode { line: usize, encoding: &'static str },
    #[error("encoding {0} is not ASCII-compatible")]
    UnsupportedEncoding(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// True for errors confined to a single data row; the reader stays usable.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedEscape { .. } | Error::ShapeMismatch { .. } | Error::Decode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = Error::MissingColumns(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "missing required column(s): a, b");
    }

    #[test]
    fn escape_errors_render_the_sequence() {
        let err = Error::MalformedEscape {
            line: 3,
            source: EscapeError::InvalidSequence { field: 1, found: 'x' },
        };
        assert_eq!(
            err.to_string(),
            "malformed escape on line 3: invalid escape sequence '\\x' in field 1"
        );
        assert!(err.is_row_error());
    }

    #[test]
    fn io_errors_are_not_row_errors() {
        let err = Error::from(io::Error::other("disk gone"));
        assert!(!err.is_row_error());
        assert_eq!(err.to_string(), "disk gone");
    }
}
