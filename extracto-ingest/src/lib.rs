//! extracto-ingest: turns extracted statement tables into cleaned movement records.
//!
//! Stages, in order: [`selector`] picks the movements table, [`columns`]
//! relabels positional columns, [`clean`] validates and converts each row.
//! [`pipeline::StatementExtractor`] composes them behind a [`source::TableSource`].

pub mod clean;
pub mod columns;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod source;
pub mod types;

pub use clean::RowCleaner;
pub use error::ExtractError;
pub use pipeline::StatementExtractor;
pub use source::{InMemoryTables, JsonTableSource, TableSource};
pub use types::{
    DebugExtraction, ExtractionEnvelope, ExtractionReport, RowField, RowOutcome, SkipReason,
    SkippedRow,
};
