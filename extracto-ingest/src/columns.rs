//! Column normalizer: positional columns to semantic keys.
//!
//! Expected column order:
//!   Fecha operacion | Fecha valor | Concepto | Importe | Saldo
//! Column positions are decided once per table, then each row is read by
//! label, so a row missing a cell leaves that one key absent. Placeholder
//! labels (`Unnamed: 3`) carry their own position. Columns past the fifth
//! are dropped.

use extracto_core::{NormalizedRow, RawRow, RawTable};

const PLACEHOLDER_PREFIX: &str = "Unnamed: ";

/// Columns that map onto semantic keys
const SEMANTIC_COLUMNS: usize = 5;

/// Column labels of one table, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    labels: Vec<String>,
}

impl ColumnLayout {
    /// Column order of a table.
    ///
    /// When every label is a placeholder, the number in it is the position,
    /// gaps included, and only the semantic columns are kept. Otherwise the label order of every row is merged: a
    /// label first seen in a later row goes right after the label that
    /// precedes it in that row (or first, if nothing precedes it).
    pub fn from_table(table: &RawTable) -> Self {
        Self::from_placeholders(table).unwrap_or_else(|| Self::from_row_order(table))
    }

    fn from_placeholders(table: &RawTable) -> Option<Self> {
        let mut last: Option<usize> = None;
        for label in table.iter().flat_map(RawRow::labels) {
            let position = placeholder_position(label)?;
            last = last.max(Some(position));
        }
        let last = last?.min(SEMANTIC_COLUMNS - 1);
        let labels = (0..=last).map(|i| format!("{PLACEHOLDER_PREFIX}{i}")).collect();
        Some(Self { labels })
    }

    fn from_row_order(table: &RawTable) -> Self {
        let mut labels: Vec<String> = Vec::new();
        for row in table {
            let mut prev: Option<usize> = None;
            for label in row.labels() {
                let pos = match labels.iter().position(|l| l == label) {
                    Some(pos) => pos,
                    None => {
                        let at = prev.map_or(0, |p| p + 1);
                        labels.insert(at, label.to_string());
                        at
                    }
                };
                prev = Some(pos);
            }
        }
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn normalize(&self, row: &RawRow) -> NormalizedRow {
        let cell = |i: usize| self.labels.get(i).and_then(|label| row.get(label));
        NormalizedRow {
            transaction_date_raw: cell(0),
            value_date_raw: cell(1),
            concept_raw: cell(2),
            amount_raw: cell(3),
            balance_raw: cell(4),
        }
    }
}

fn placeholder_position(label: &str) -> Option<usize> {
    label.strip_prefix(PLACEHOLDER_PREFIX)?.parse().ok()
}

pub fn normalize_table(table: &RawTable) -> Vec<NormalizedRow> {
    let layout = ColumnLayout::from_table(table);
    table.iter().map(|row| layout.normalize(row)).collect()
}
