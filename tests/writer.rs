mod common;

use std::io::{BufWriter, Cursor};

use common::{SAMPLE_COLUMNS, sample_rows};
use unitsv::{ColumnSpec, Error, Reader, Writer};

const SAMPLE_OUTPUT: &str = "header2\theader\tabc\n\
a\t1\t3002234232222342\n\
\tu\tx\n\
...\tü\tn\n\
\\n\t\\t\t\\\\n\n";

#[test]
fn writes_sample_rows_exactly() {
    let mut writer = Writer::new(Vec::new(), &SAMPLE_COLUMNS).expect("writer");
    for row in sample_rows() {
        writer.write_row(&row).expect("write row");
    }
    assert_eq!(writer.rows_written(), 4);
    let bytes = writer.into_inner().expect("flush");
    assert_eq!(String::from_utf8(bytes).expect("utf-8"), SAMPLE_OUTPUT);
}

#[test]
fn wrong_width_rows_emit_no_bytes() {
    let mut writer = Writer::new(Vec::new(), &SAMPLE_COLUMNS).expect("writer");
    let header_len = writer.get_ref().len();
    for bad in [vec![], vec!["a"], vec!["a", "b", "c", "d"]] {
        let err = writer.write_row(&bad).unwrap_err();
        assert!(matches!(err, Error::InvalidRowLength { expected: 3, found } if found == bad.len()));
    }
    assert_eq!(writer.get_ref().len(), header_len);
    writer.write_row(&["x", "y", "z"]).expect("valid row after rejects");
}

#[test]
fn buffered_output_reaches_sink_on_flush() {
    let mut writer =
        Writer::new(BufWriter::with_capacity(1024, Vec::new()), &["k"]).expect("writer");
    writer.write_row(&["v"]).expect("row");
    assert!(writer.get_ref().get_ref().is_empty());
    writer.flush().expect("flush");
    assert_eq!(writer.get_ref().get_ref().as_slice(), b"k\nv\n");
}

#[test]
fn written_output_reads_back_through_reader() {
    let columns = ["note", "id"];
    let rows = vec![
        vec!["tab\there".to_string(), "1".to_string()],
        vec!["line\nbreak \\ slash".to_string(), "2".to_string()],
        vec![String::new(), "3".to_string()],
    ];
    let mut writer = Writer::new(Vec::new(), &columns).expect("writer");
    for row in &rows {
        writer.write_row(row).expect("write row");
    }
    let bytes = writer.into_inner().expect("flush");

    let mut reader =
        Reader::new(Cursor::new(bytes), &ColumnSpec::required(columns)).expect("reader");
    let read = reader.rows().collect::<unitsv::Result<Vec<_>>>().expect("rows");
    assert_eq!(read, rows);
}
