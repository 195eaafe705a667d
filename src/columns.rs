//! Column declarations: which columns a caller wants, and in what order.
//!
//! Required columns come first in every projected row, optional columns
//! follow. Declarations can be built in code, parsed from comma-separated CLI
//! lists, or loaded from a YAML file:
//!
//! ```yaml
//! required: [header2, header]
//! optional: [abc]
//! ```

use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
}

impl ColumnSpec {
    pub fn new<R, O>(required: R, optional: O) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            optional: optional.into_iter().map(Into::into).collect(),
        }
    }

    /// A declaration where every column must be present.
    pub fn required<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(names, Vec::<String>::new())
    }

    /// Builds a declaration from repeatable, comma-separated CLI values.
    pub fn from_cli(required: &[String], optional: &[String]) -> Self {
        Self {
            required: split_column_list(required),
            optional: split_column_list(optional),
        }
    }

    /// Number of slots in a projected row.
    pub fn width(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }

    /// Every declared name in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }

    /// Rejects declarations that name the same column twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.width());
        for name in self.names() {
            if name.is_empty() {
                bail!("Column names cannot be empty");
            }
            if !seen.insert(name) {
                bail!("Column '{name}' is declared more than once");
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening column file {path:?}"))?;
        let reader = BufReader::new(file);
        let spec: ColumnSpec =
            serde_yaml::from_reader(reader).context("Parsing column file YAML")?;
        spec.validate()
            .with_context(|| format!("Validating column file {path:?}"))?;
        Ok(spec)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let file =
            File::create(path).with_context(|| format!("Creating column file {path:?}"))?;
        serde_yaml::to_writer(file, self).context("Writing column file YAML")
    }
}

fn split_column_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect()
}
