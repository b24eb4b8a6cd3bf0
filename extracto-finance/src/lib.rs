//! extracto-finance: ledger entries, statement summary and CSV export for extracted movements

pub mod export;
pub mod ledger;
pub mod summary;

pub use export::write_movements_csv;
pub use ledger::{LedgerEntry, to_ledger_entries};
pub use summary::StatementSummary;
