//! Row and table shapes before and after column relabeling

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cell::RawCell;

/// A row as produced by table extraction: column label to cell, in column order.
///
/// Labels are often positional placeholders (`Unnamed: 0`, `Unnamed: 1`, ...).
/// Column order is part of the data; the backing map keeps keys in the order
/// they appear in the source object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: Map<String, Value>,
}

/// One extracted table
pub type RawTable = Vec<RawRow>;

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column. An existing label keeps its position and takes the new value.
    pub fn insert(&mut self, label: impl Into<String>, cell: impl Into<RawCell>) {
        let cell: RawCell = cell.into();
        self.cells.insert(label.into(), cell.into());
    }

    /// Builder form of [`RawRow::insert`]
    pub fn with(mut self, label: impl Into<String>, cell: impl Into<RawCell>) -> Self {
        self.insert(label, cell);
        self
    }

    pub fn get(&self, label: &str) -> Option<RawCell> {
        self.cells.get(label).map(RawCell::from)
    }

    /// Cells in column order
    pub fn values(&self) -> impl Iterator<Item = RawCell> + '_ {
        self.cells.values().map(RawCell::from)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawCell>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (label, cell) in iter {
            row.insert(label, cell);
        }
        row
    }
}

/// A row relabeled onto the fixed semantic keys.
///
/// A key is `None` when the source table has no cell for that column in this row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub transaction_date_raw: Option<RawCell>,
    pub value_date_raw: Option<RawCell>,
    pub concept_raw: Option<RawCell>,
    pub amount_raw: Option<RawCell>,
    pub balance_raw: Option<RawCell>,
}
