#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Header plus four rows exercising reordering, empty fields, non-ASCII text
/// and every escape sequence.
pub const SAMPLE_TSV: &str = "header\theader2\tabc\n\
1\ta\t3002234232222342\n\
u\t\tx\n\
ü\t...\tn\n\
\\t\t\\n\t\\\\n\n";

pub const SAMPLE_COLUMNS: [&str; 3] = ["header2", "header", "abc"];

/// Rows of [`SAMPLE_TSV`] projected onto [`SAMPLE_COLUMNS`].
pub fn sample_rows() -> Vec<Vec<String>> {
    [
        ["a", "1", "3002234232222342"],
        ["", "u", "x"],
        ["...", "ü", "n"],
        ["\n", "\t", "\\n"],
    ]
    .iter()
    .map(|row| row.iter().map(|field| field.to_string()).collect())
    .collect()
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read temp file")
    }
}
