//! Header-addressed row reader.
//!
//! [`Reader::new`] consumes the header line and resolves a [`ColumnSpec`]
//! against it once. Every call to [`Reader::read_row`] then returns the
//! declared columns in declaration order, regardless of where they sit in the
//! file. End of input is `Ok(None)`.
//!
//! Lines end at `\n`; a `\r` directly before it is dropped. The writer does
//! not escape `\r`, so a last field ending in `\r` does not survive a round
//! trip.

use std::{collections::HashMap, io::BufRead};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

use crate::{
    codec,
    columns::ColumnSpec,
    error::{Error, Result},
};

#[derive(Debug)]
pub struct Reader<R> {
    source: R,
    encoding: &'static Encoding,
    headers: Vec<String>,
    /// (output slot, physical field) pairs.
    column_map: Vec<(usize, usize)>,
    width: usize,
    line: usize,
    buffer: Vec<u8>,
    exhausted: bool,
}

impl<R: BufRead> Reader<R> {
    /// Reads the header and resolves `columns` against it, decoding UTF-8.
    pub fn new(source: R, columns: &ColumnSpec) -> Result<Self> {
        Self::with_encoding(source, columns, UTF_8)
    }

    /// Like [`Reader::new`], decoding lines with `encoding`.
    ///
    /// Only ASCII-compatible encodings are accepted since lines are split on
    /// the `\n` byte before decoding.
    pub fn with_encoding(
        source: R,
        columns: &ColumnSpec,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        if !encoding.is_ascii_compatible() {
            return Err(Error::UnsupportedEncoding(encoding.name()));
        }
        let mut reader = Reader {
            source,
            encoding,
            headers: Vec::new(),
            column_map: Vec::with_capacity(columns.width()),
            width: columns.width(),
            line: 0,
            buffer: Vec::new(),
            exhausted: false,
        };

        // An input without any line has zero columns; only an empty
        // declaration can be satisfied by it.
        if let Some(header) = reader.next_line()? {
            reader.headers = codec::split_fields(&header)
                .map_err(|source| Error::MalformedEscape { line: 1, source })?;
        }
        reader.column_map = resolve_columns(&reader.headers, columns)?;
        debug!(
            "Resolved {} of {} declared column(s) against {} header field(s)",
            reader.column_map.len(),
            columns.width(),
            reader.headers.len()
        );
        Ok(reader)
    }

    /// Reads the next row projected into declaration order.
    ///
    /// Optional columns missing from the header are empty strings.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        let Some(record) = self.read_record()? else {
            return Ok(None);
        };
        let mut row = vec![String::new(); self.width];
        for &(slot, field) in &self.column_map {
            row[slot] = record[field].clone();
        }
        Ok(Some(row))
    }

    /// Reads the next row in physical file order, validated against the
    /// header width.
    pub fn read_record(&mut self) -> Result<Option<Vec<String>>> {
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let fields = codec::split_fields(&line).map_err(|source| Error::MalformedEscape {
            line: self.line,
            source,
        })?;
        if fields.len() != self.headers.len() {
            return Err(Error::ShapeMismatch {
                line: self.line,
                expected: self.headers.len(),
                found: fields.len(),
            });
        }
        Ok(Some(fields))
    }

    /// Iterates over projected rows until end of input.
    pub fn rows(&mut self) -> Rows<'_, R> {
        Rows { reader: self }
    }

    /// Decoded header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Width of rows returned by [`Reader::read_row`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of declared columns that resolved against the header.
    pub fn resolved(&self) -> usize {
        self.column_map.len()
    }

    /// 1-based number of the last line consumed; 0 before any input.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        if self.exhausted {
            return Ok(None);
        }
        self.buffer.clear();
        if self.source.read_until(b'\n', &mut self.buffer)? == 0 {
            self.exhausted = true;
            return Ok(None);
        }
        self.line += 1;

        let mut bytes = self.buffer.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest.strip_suffix(b"\r").unwrap_or(rest);
        }
        // Only the declared encoding's own BOM is dropped, and only on line 1.
        let (text, had_errors) = if self.line == 1 {
            self.encoding.decode_with_bom_removal(bytes)
        } else {
            self.encoding.decode_without_bom_handling(bytes)
        };
        if had_errors {
            return Err(Error::Decode {
                line: self.line,
                encoding: self.encoding.name(),
            });
        }
        Ok(Some(text.into_owned()))
    }
}

pub struct Rows<'a, R> {
    reader: &'a mut Reader<R>,
}

impl<R: BufRead> Iterator for Rows<'_, R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}

fn resolve_columns(headers: &[String], columns: &ColumnSpec) -> Result<Vec<(usize, usize)>> {
    let mut index = HashMap::with_capacity(headers.len());
    for (position, name) in headers.iter().enumerate() {
        if let Some(previous) = index.insert(name.as_str(), position) {
            warn!(
                "Header column '{name}' appears at positions {previous} and {position}; using {position}"
            );
        }
    }

    let mut column_map = Vec::with_capacity(columns.width());
    let mut missing = Vec::new();
    for (slot, name) in columns.required.iter().enumerate() {
        match index.get(name.as_str()) {
            Some(&field) => column_map.push((slot, field)),
            None => missing.push(name.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    let offset = columns.required.len();
    for (idx, name) in columns.optional.iter().enumerate() {
        match index.get(name.as_str()) {
            Some(&field) => column_map.push((offset + idx, field)),
            None => debug!("Optional column '{name}' not present in header"),
        }
    }
    Ok(column_map)
}
