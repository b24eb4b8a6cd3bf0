//! Table sources: the boundary to whatever engine pulls tables out of a statement.
//!
//! The extraction engine itself lives outside this crate. Its output is
//! exchanged as JSON shaped `[[{label: cell, ...}, ...], ...]`: one array
//! per table, one object per row, columns in document order.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use extracto_core::RawTable;

/// Anything that can produce the ordered list of tables of one document
pub trait TableSource {
    fn read_tables(&self) -> Result<Vec<RawTable>>;

    /// Human-facing name of the underlying document, if any
    fn name(&self) -> Option<String> {
        None
    }
}

/// Tables stored as JSON on disk, read on every call
#[derive(Debug, Clone)]
pub struct JsonTableSource {
    path: PathBuf,
}

impl JsonTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for JsonTableSource {
    fn read_tables(&self) -> Result<Vec<RawTable>> {
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        parse_tables_json(&s).with_context(|| format!("parse {}", self.path.display()))
    }

    fn name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Tables already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTables {
    tables: Vec<RawTable>,
}

impl InMemoryTables {
    pub fn new(tables: Vec<RawTable>) -> Self {
        Self { tables }
    }
}

impl TableSource for InMemoryTables {
    fn read_tables(&self) -> Result<Vec<RawTable>> {
        Ok(self.tables.clone())
    }
}

pub fn parse_tables_json(s: &str) -> Result<Vec<RawTable>> {
    serde_json::from_str(s).context("tables JSON must be an array of arrays of row objects")
}

pub fn read_tables_json<R: Read>(reader: R) -> Result<Vec<RawTable>> {
    serde_json::from_reader(reader).context("tables JSON must be an array of arrays of row objects")
}
