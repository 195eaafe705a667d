//! Conversion between delimited CSV and escaped TSV.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{ExportArgs, ImportArgs},
    column_spec, io_utils,
};

pub fn import(args: &ImportArgs) -> Result<()> {
    let delimiter = args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let input = io_utils::open_input(&args.input)?;
    let mut reader = io_utils::open_csv_reader(input, delimiter);

    let header_record = reader
        .byte_headers()
        .with_context(|| format!("Reading CSV header of {:?}", args.input))?
        .clone();
    let headers = io_utils::decode_record(&header_record, encoding)?;
    let mut writer = io_utils::open_tsv_writer(args.output.as_deref(), &headers)?;

    for (idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading CSV row {}", idx + 2))?;
        let fields = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding CSV row {}", idx + 2))?;
        writer.write_row(&fields).context("Writing TSV row")?;
    }
    writer.flush().context("Flushing output")?;

    info!(
        "Imported {} row(s) across {} column(s) from {:?}",
        writer.rows_written(),
        headers.len(),
        args.input
    );
    Ok(())
}

pub fn export(args: &ExportArgs) -> Result<()> {
    let delimiter = args.delimiter.unwrap_or(io_utils::DEFAULT_CSV_DELIMITER);
    let spec = column_spec(&args.columns)?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut reader = io_utils::open_tsv_reader(&args.input, &spec, encoding)?;

    let output = io_utils::open_output(args.output.as_deref())?;
    let mut writer = io_utils::open_csv_writer(output, delimiter);
    let keep_all = spec.is_empty();
    if keep_all {
        writer.write_record(reader.headers())?;
    } else {
        writer.write_record(spec.names())?;
    }

    let mut rows = 0usize;
    loop {
        let next = if keep_all {
            reader.read_record()
        } else {
            reader.read_row()
        };
        let Some(row) = next.with_context(|| format!("Reading {:?}", args.input))? else {
            break;
        };
        writer.write_record(&row).context("Writing CSV row")?;
        rows += 1;
    }
    writer.flush().context("Flushing output")?;

    info!("Exported {rows} row(s) from {:?}", args.input);
    Ok(())
}
