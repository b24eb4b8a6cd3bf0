//! Statement extraction: source -> selector -> normalizer -> cleaner -> result.

use extracto_core::{ExtractionResult, NormalizedRow, RawTable};
use tracing::{debug, info, warn};

use crate::clean::RowCleaner;
use crate::columns::normalize_table;
use crate::error::ExtractError;
use crate::selector::select_movements_table;
use crate::source::TableSource;
use crate::types::{DebugExtraction, ExtractionEnvelope, ExtractionReport, RowOutcome, SkippedRow};

/// Extracts movements from the tables of one statement.
///
/// Holds no per-call state, so one extractor can serve any number of calls.
#[derive(Debug, Clone)]
pub struct StatementExtractor<S> {
    source: S,
    cleaner: RowCleaner,
}

impl<S: TableSource> StatementExtractor<S> {
    pub fn new(source: S) -> Result<Self, regex::Error> {
        Ok(Self {
            source,
            cleaner: RowCleaner::new()?,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the whole pipeline. Never fails: call-level problems come back
    /// as `success = false` with a single error message.
    pub fn extract_movements(&self) -> ExtractionResult {
        self.extract_report().result
    }

    /// Like [`Self::extract_movements`], also reporting which rows were skipped and why
    pub fn extract_report(&self) -> ExtractionReport {
        match self.source.read_tables() {
            Ok(tables) => self.process_tables(&tables),
            Err(err) => failed(ExtractError::source(&err)),
        }
    }

    /// Result tagged with the bank it belongs to and the source document name
    pub fn extract_envelope(&self, bank_id: u32) -> ExtractionEnvelope {
        ExtractionEnvelope {
            result: self.extract_movements(),
            bank_id,
            filename: self.source.name(),
        }
    }

    /// Every raw table next to the processed result.
    ///
    /// Unlike [`Self::extract_movements`] a failing source is an error here,
    /// since there is nothing to show.
    pub fn extract_debug(&self) -> anyhow::Result<DebugExtraction> {
        let tables = self.source.read_tables()?;
        let processed_data = self.process_tables(&tables).result;
        Ok(DebugExtraction {
            success: true,
            filename: self.source.name(),
            raw_data: tables,
            processed_data,
        })
    }

    pub fn process_tables(&self, tables: &[RawTable]) -> ExtractionReport {
        match select_movements_table(tables) {
            Ok(table) => self.process_rows(&normalize_table(table)),
            Err(err) => failed(err),
        }
    }

    pub fn process_rows(&self, rows: &[NormalizedRow]) -> ExtractionReport {
        let mut movements = Vec::new();
        let mut skipped = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            match self.cleaner.clean_row(row) {
                RowOutcome::Accepted(record) => movements.push(record),
                RowOutcome::Skipped(reason) => {
                    debug!(index, %reason, "skipping row");
                    skipped.push(SkippedRow { index, reason });
                }
            }
        }

        info!(
            rows = rows.len(),
            accepted = movements.len(),
            skipped = skipped.len(),
            "processed movements table"
        );

        ExtractionReport {
            result: ExtractionResult::succeeded(movements),
            skipped,
        }
    }
}

fn failed(err: ExtractError) -> ExtractionReport {
    warn!(error = %err, "extraction failed");
    ExtractionReport {
        result: ExtractionResult::failed(err.to_string()),
        skipped: Vec::new(),
    }
}
