use std::fmt;

use extracto_core::{ExtractionResult, MovementRecord, RawTable};
use serde::Serialize;

/// Row fields that can disqualify a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    TransactionDate,
    ValueDate,
    Concept,
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RowField::TransactionDate => "transaction_date",
            RowField::ValueDate => "value_date",
            RowField::Concept => "concept",
        })
    }
}

/// Why a row produced no movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// A required field was absent or blank.
    MissingField { field: RowField },
    /// Opening-balance line ("SALDO ANTERIOR"), not a movement.
    BalanceRecord,
    /// A date cell was not a valid DD/MM.
    InvalidDate { field: RowField, value: Option<String> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingField { field } => write!(f, "missing {field}"),
            SkipReason::BalanceRecord => f.write_str("prior balance record"),
            SkipReason::InvalidDate { field, value: Some(v) } => {
                write!(f, "invalid {field}: {v:?}")
            }
            SkipReason::InvalidDate { field, value: None } => write!(f, "invalid {field}: absent"),
        }
    }
}

/// Result of cleaning a single row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(MovementRecord),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// Zero-based position in the movements table
    pub index: usize,
    pub reason: SkipReason,
}

/// Extraction result plus the per-row skip accounting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub result: ExtractionResult,
    pub skipped: Vec<SkippedRow>,
}

/// Raw tables alongside the processed result, for inspecting extraction problems
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugExtraction {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub raw_data: Vec<RawTable>,
    pub processed_data: ExtractionResult,
}

/// Result as handed to the calling service, tagged with its origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionEnvelope {
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub bank_id: u32,
    pub filename: Option<String>,
}
