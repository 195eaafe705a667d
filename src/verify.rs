use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::info;

use crate::{cli::VerifyArgs, column_spec, columns::ColumnSpec, io_utils};

pub fn execute(args: &VerifyArgs) -> Result<()> {
    let spec = column_spec(&args.columns)?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    for input in &args.inputs {
        let rows = verify_file(input, &spec, encoding)?;
        info!("✓ {:?} is valid ({rows} row(s))", input);
    }
    Ok(())
}

/// Reads every row of `path`, returning the row count or the first failure.
pub fn verify_file(path: &Path, spec: &ColumnSpec, encoding: &'static Encoding) -> Result<usize> {
    let mut reader = io_utils::open_tsv_reader(path, spec, encoding)?;
    let mut rows = 0usize;
    while reader
        .read_record()
        .with_context(|| format!("Verifying {path:?}"))?
        .is_some()
    {
        rows += 1;
    }
    Ok(rows)
}
