use std::fmt::Write as _;

use crate::codec::escape_field;

const COLUMN_GAP: &str = "  ";

/// Renders rows as an aligned plain-text table.
///
/// Cells are shown in their escaped form so embedded tabs and newlines stay
/// on one line. Cells beyond the header width are ignored.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let header_cells = headers
        .iter()
        .map(|h| escape_field(h).into_owned())
        .collect::<Vec<_>>();
    let body = rows
        .iter()
        .map(|row| {
            row.iter()
                .take(headers.len())
                .map(|cell| escape_field(cell).into_owned())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut widths = header_cells
        .iter()
        .map(|cell| cell.chars().count().max(3))
        .collect::<Vec<_>>();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_line(&header_cells, &widths));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_line(&rule, &widths));
    for row in &body {
        let _ = writeln!(output, "{}", format_line(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str(COLUMN_GAP);
        }
        let _ = write!(line, "{cell:<width$}");
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn columns_align_on_widest_cell() {
        let rendered = render_table(
            &strings(&["id", "name"]),
            &[strings(&["1", "Alice"]), strings(&["22", "Bo"])],
        );
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines, vec!["id   name", "---  -----", "1    Alice", "22   Bo"]);
    }

    #[test]
    fn control_characters_render_escaped() {
        let rendered = render_table(&strings(&["note"]), &[strings(&["a\tb\nc"])]);
        assert_eq!(rendered.lines().nth(2), Some("a\\tb\\nc"));
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let rendered = render_table(&strings(&["ü", "x"]), &[strings(&["üüüü", "1"])]);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "ü     x");
        assert_eq!(lines[2], "üüüü  1");
    }
}
