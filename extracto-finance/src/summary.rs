//! Totals over one statement's movements

use extracto_core::MovementRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub movement_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub total_income: f64,
    /// Sum of outgoing amounts, as a positive number
    pub total_expense: f64,
    pub net: f64,
    /// Balance of the last movement that carried a readable one
    pub closing_balance: Option<f64>,
}

impl StatementSummary {
    pub fn from_records(records: &[MovementRecord]) -> Self {
        let mut summary = StatementSummary {
            movement_count: records.len(),
            ..Default::default()
        };

        for r in records {
            let amount = r.amount_value().unwrap_or(0.0);
            if r.is_income() {
                summary.income_count += 1;
                summary.total_income += amount;
            } else {
                summary.expense_count += 1;
                summary.total_expense += amount.abs();
            }
            if let Some(b) = r.balance_value() {
                summary.closing_balance = Some(b);
            }
        }

        summary.net = summary.total_income - summary.total_expense;
        summary
    }
}
