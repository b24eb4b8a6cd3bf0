//! Ledger entries: movements resolved against a statement year, ready to store.

use chrono::NaiveDate;
use extracto_core::{MovementRecord, MovementType};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Longest comment the ledger keeps, in characters
pub const COMMENT_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub movement_type: MovementType,
    pub bank_id: u32,
    pub transaction_date: NaiveDate,
    pub value_date: NaiveDate,
    /// Absolute value; direction lives in `movement_type`
    pub amount: f64,
    /// Signed amount as extracted
    pub original_amount: f64,
    /// 0.0 when the statement line had no readable balance
    pub balance: f64,
    pub comment: String,
}

impl LedgerEntry {
    /// `None` when either date does not exist in `year` (e.g. 29/02 outside leap years).
    ///
    /// The direction is the record's own `movement_type`, so a zero or absent
    /// amount stays an expense.
    pub fn from_record(record: &MovementRecord, year: i32, bank_id: u32) -> Option<Self> {
        let transaction_date = record.transaction_date.with_year(year)?;
        let value_date = record.value_date.with_year(year)?;
        let original_amount = record.amount_value().unwrap_or(0.0);

        Some(Self {
            movement_type: record.movement_type,
            bank_id,
            transaction_date,
            value_date,
            amount: original_amount.abs(),
            original_amount,
            balance: record.balance_value().unwrap_or(0.0),
            comment: clean_comment(&record.concept),
        })
    }

    pub fn is_income(&self) -> bool {
        self.movement_type == MovementType::Income
    }
}

/// Convert records into ledger entries, dropping those whose dates don't exist in `year`
pub fn to_ledger_entries(records: &[MovementRecord], year: i32, bank_id: u32) -> Vec<LedgerEntry> {
    records
        .iter()
        .filter_map(|r| {
            let entry = LedgerEntry::from_record(r, year, bank_id);
            if entry.is_none() {
                warn!(
                    transaction_date = %r.transaction_date,
                    value_date = %r.value_date,
                    year,
                    "date does not exist in statement year, dropping movement"
                );
            }
            entry
        })
        .collect()
}

/// Single-spaced and capped at [`COMMENT_MAX_CHARS`]
pub fn clean_comment(concept: &str) -> String {
    concept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(COMMENT_MAX_CHARS)
        .collect()
}
