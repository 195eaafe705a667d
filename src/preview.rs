use anyhow::{Context, Result};
use log::info;

use crate::{cli::PreviewArgs, column_spec, io_utils, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let spec = column_spec(&args.columns)?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let mut reader = io_utils::open_tsv_reader(&args.input, &spec, encoding)?;

    let headers = if spec.is_empty() {
        reader.headers().to_vec()
    } else {
        spec.names().map(str::to_string).collect()
    };
    let mut rows = Vec::new();
    while rows.len() < args.rows {
        let next = if spec.is_empty() {
            reader.read_record()
        } else {
            reader.read_row()
        };
        match next.with_context(|| format!("Reading row {}", reader.line_number()))? {
            Some(row) => rows.push(row),
            None => break,
        }
    }

    table::print_table(&headers, &rows);
    info!("Displayed {} row(s) from {:?}", rows.len(), args.input);
    Ok(())
}
