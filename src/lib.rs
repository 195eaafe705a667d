//! Reader and writer for header-addressed, backslash-escaped TSV.
//!
//! ```
//! use std::io::Cursor;
//! use unitsv::{ColumnSpec, Reader, Writer};
//!
//! let input = "id\tname\n1\tAda\\tL.\n";
//! let columns = ColumnSpec::new(["name"], ["email"]);
//! let mut reader = Reader::new(Cursor::new(input), &columns)?;
//! assert_eq!(reader.read_row()?, Some(vec!["Ada\tL.".to_string(), String::new()]));
//! assert_eq!(reader.read_row()?, None);
//!
//! let mut writer = Writer::new(Vec::new(), &["name"])?;
//! writer.write_row(&["Ada\tL."])?;
//! assert_eq!(writer.into_inner()?, b"name\nAda\\tL.\n");
//! # Ok::<(), unitsv::Error>(())
//! ```

pub mod cli;
pub mod codec;
pub mod columns;
pub mod convert;
pub mod error;
pub mod io_utils;
pub mod preview;
pub mod reader;
pub mod select;
pub mod table;
pub mod verify;
pub mod writer;

pub use columns::ColumnSpec;
pub use error::{Error, EscapeError, Result};
pub use reader::Reader;
pub use writer::Writer;

use std::{env, sync::OnceLock};

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, ColumnArgs, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("unitsv", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Select(args) => select::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Verify(args) => verify::execute(&args),
        Commands::Import(args) => convert::import(&args),
        Commands::Export(args) => convert::export(&args),
    }
}

pub(crate) fn column_spec(args: &ColumnArgs) -> anyhow::Result<ColumnSpec> {
    if let Some(path) = &args.columns_file {
        return ColumnSpec::load(path)
            .with_context(|| format!("Loading column declaration from {path:?}"));
    }
    let spec = ColumnSpec::from_cli(&args.required, &args.optional);
    spec.validate()?;
    Ok(spec)
}
