//! CSV export of extracted movements

use std::io::Write;

use anyhow::{Context, Result};
use extracto_core::MovementRecord;

const HEADER: [&str; 6] = [
    "transaction_date",
    "value_date",
    "concept",
    "amount",
    "balance",
    "movement_type",
];

/// Write one header line and one row per movement. Absent values are empty cells.
pub fn write_movements_csv<W: Write>(records: &[MovementRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).context("write csv header")?;

    for r in records {
        let transaction_date = r.transaction_date.to_string();
        let value_date = r.value_date.to_string();
        wtr.write_record([
            transaction_date.as_str(),
            value_date.as_str(),
            r.concept.as_str(),
            r.amount.as_deref().unwrap_or(""),
            r.balance.as_deref().unwrap_or(""),
            r.movement_type.code(),
        ])
        .context("write csv row")?;
    }

    wtr.flush().context("flush csv")?;
    Ok(())
}
