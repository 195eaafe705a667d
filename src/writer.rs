//! Row writer producing the escaped tab-separated format.
//!
//! The header is written on construction and fixes the row width. Once the
//! sink reports an error, the writer keeps returning that error without
//! touching the sink again.

use std::io::{self, Write};

use crate::{
    codec,
    error::{Error, Result},
};

#[derive(Debug, Clone)]
struct Failure {
    kind: io::ErrorKind,
    message: String,
}

impl Failure {
    fn to_error(&self) -> Error {
        Error::Io(io::Error::new(self.kind, self.message.clone()))
    }
}

#[derive(Debug)]
pub struct Writer<W: Write> {
    sink: W,
    width: usize,
    rows_written: usize,
    failure: Option<Failure>,
}

impl<W: Write> Writer<W> {
    /// Writes the header row and returns a writer for rows of the same width.
    pub fn new<S: AsRef<str>>(sink: W, columns: &[S]) -> Result<Self> {
        let mut writer = Writer {
            sink,
            width: columns.len(),
            rows_written: 0,
            failure: None,
        };
        writer.write_line(columns)?;
        Ok(writer)
    }

    /// Writes one row. A row of the wrong width is rejected before any byte
    /// reaches the sink.
    pub fn write_row<S: AsRef<str>>(&mut self, row: &[S]) -> Result<()> {
        if row.len() != self.width {
            return Err(Error::InvalidRowLength {
                expected: self.width,
                found: row.len(),
            });
        }
        self.write_line(row)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        let result = self.sink.flush();
        self.record(result)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Data rows written so far, excluding the header.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Flushes and returns the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.sink)
    }

    fn write_line<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        if let Some(failure) = &self.failure {
            return Err(failure.to_error());
        }
        let mut line = codec::join_fields(fields);
        line.push(codec::ROW_TERMINATOR);
        let result = self.sink.write_all(line.as_bytes());
        self.record(result)
    }

    fn record(&mut self, result: io::Result<()>) -> Result<()> {
        result.map_err(|err| {
            self.failure = Some(Failure {
                kind: err.kind(),
                message: err.to_string(),
            });
            Error::Io(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `budget` bytes, then fails every write.
    #[derive(Debug)]
    struct FailingSink {
        written: Vec<u8>,
        budget: usize,
        attempts: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            if self.written.len() + buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "sink full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn invalid_row_length_writes_nothing() {
        let mut writer = Writer::new(Vec::new(), &["a", "b"]).expect("writer");
        let before = writer.get_ref().len();
        let err = writer.write_row(&["only one"]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRowLength {
                expected: 2,
                found: 1
            }
        ));
        assert_eq!(writer.get_ref().len(), before);
        assert_eq!(writer.rows_written(), 0);
    }

    #[test]
    fn header_failure_fails_construction() {
        let sink = FailingSink {
            written: Vec::new(),
            budget: 0,
            attempts: 0,
        };
        let err = Writer::new(sink, &["a"]).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::StorageFull));
    }

    #[test]
    fn write_errors_are_sticky() {
        let sink = FailingSink {
            written: Vec::new(),
            budget: 4,
            attempts: 0,
        };
        let mut writer = Writer::new(sink, &["a", "b"]).expect("header fits");
        assert!(writer.write_row(&["long", "row"]).is_err());
        let attempts = writer.get_ref().attempts;

        // Later calls fail without reaching the sink.
        let err = writer.write_row(&["", ""]).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::StorageFull));
        assert!(writer.flush().is_err());
        assert_eq!(writer.get_ref().attempts, attempts);
        assert_eq!(writer.get_ref().written, b"a\tb\n");
    }

    #[test]
    fn into_inner_returns_written_bytes() {
        let mut writer = Writer::new(Vec::new(), &["x"]).expect("writer");
        writer.write_row(&["1\\2"]).expect("row");
        assert_eq!(writer.rows_written(), 1);
        let bytes = writer.into_inner().expect("inner");
        assert_eq!(bytes, b"x\n1\\\\2\n");
    }
}
