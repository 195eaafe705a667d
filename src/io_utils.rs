//! Stream plumbing for the command line tools.
//!
//! - `-` as a path routes through stdin/stdout.
//! - Input encodings resolve through `encoding_rs` labels, defaulting to UTF-8.
//! - CSV readers and writers for `import`/`export` are built here so every
//!   command configures the `csv` crate the same way.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::{columns::ColumnSpec, reader::Reader, writer::Writer};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_dash(p) => Ok(Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        ))),
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn open_tsv_reader(
    path: &Path,
    columns: &ColumnSpec,
    encoding: &'static Encoding,
) -> Result<Reader<Box<dyn BufRead>>> {
    let input = open_input(path)?;
    Reader::with_encoding(input, columns, encoding)
        .with_context(|| format!("Reading header of {path:?}"))
}

pub fn open_tsv_writer<S: AsRef<str>>(
    path: Option<&Path>,
    columns: &[S],
) -> Result<Writer<Box<dyn Write>>> {
    let output = open_output(path)?;
    Writer::new(output, columns).context("Writing output header")
}

pub fn open_csv_reader<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false)
        .from_reader(reader)
}

pub fn open_csv_writer<W: Write>(writer: W, delimiter: u8) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .double_quote(true)
        .from_writer(writer)
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| {
            let (text, had_errors) = encoding.decode_without_bom_handling(field);
            if had_errors {
                Err(anyhow!(
                    "Failed to decode text with encoding {}",
                    encoding.name()
                ))
            } else {
                Ok(text.into_owned())
            }
        })
        .collect()
}
