//! Column projection between TSV files.
//!
//! Reads the input through a [`Reader`](crate::Reader) built from the
//! declared columns and writes the projected rows with a header of
//! `required ++ optional`. Without a declaration every column is copied in
//! file order.

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::{cli::SelectArgs, column_spec, io_utils};

pub fn execute(args: &SelectArgs) -> Result<()> {
    let spec = column_spec(&args.columns)?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut reader = io_utils::open_tsv_reader(&args.input, &spec, encoding)?;

    let keep_all = spec.is_empty();
    let output_columns: Vec<String> = if keep_all {
        if reader.headers().is_empty() {
            bail!("Input {:?} has no header line", args.input);
        }
        reader.headers().to_vec()
    } else {
        spec.names().map(str::to_string).collect()
    };
    let mut writer = io_utils::open_tsv_writer(args.output.as_deref(), &output_columns)?;

    let mut skipped = 0usize;
    loop {
        if args.limit.is_some_and(|limit| writer.rows_written() >= limit) {
            break;
        }
        let next = if keep_all {
            reader.read_record()
        } else {
            reader.read_row()
        };
        let row = match next {
            Ok(Some(row)) => row,
            Ok(None) => break,
            Err(err) if args.skip_invalid && err.is_row_error() => {
                warn!("Skipping invalid row: {err}");
                skipped += 1;
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Reading {:?}", args.input));
            }
        };
        writer.write_row(&row).context("Writing output row")?;
    }
    writer.flush().context("Flushing output")?;

    info!(
        "Wrote {} row(s) across {} column(s) from {:?}",
        writer.rows_written(),
        output_columns.len(),
        args.input
    );
    if skipped > 0 {
        warn!("Skipped {skipped} invalid row(s)");
    }
    Ok(())
}
