//! Row filter & cleaner for BBVA-style movement tables.
//!
//! Expected cell formats after relabeling:
//!   dates     5/7, 05/07           (day/month, no year)
//!   amounts   1.234,56  -45,00     (Spanish locale, exactly two decimals)

use extracto_core::{MovementRecord, MovementType, NormalizedRow, PartialDate, RawCell};
use regex::Regex;

use crate::types::{RowField, RowOutcome, SkipReason};

/// Concept marker of the opening-balance line
const BALANCE_MARKER: &str = "SALDO ANTERIOR";

/// Compiled patterns for cell cleaning
#[derive(Debug, Clone)]
pub struct RowCleaner {
    date_re: Regex,
    amount_re: Regex,
}

impl RowCleaner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            date_re: Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})$")?,
            amount_re: Regex::new(r"^(?P<sign>-?)(?P<int>[0-9]{1,3}(?:\.[0-9]{3})*),(?P<frac>[0-9]{2})$")?,
        })
    }

    /// Parse `D/M` or `DD/MM`. Anything else, including out-of-range parts, is `None`.
    ///
    /// Only ASCII digits count; fullwidth or other script digits are rejected.
    pub fn clean_date(&self, raw: &str) -> Option<PartialDate> {
        let caps = self.date_re.captures(raw.trim())?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        PartialDate::new(day, month)
    }

    /// Convert a Spanish-locale amount to dot-decimal, keeping the sign.
    ///
    /// `1.234,56` -> `1234.56`, `-45,00` -> `-45.00`. Inputs without exactly
    /// two decimals, or with misplaced thousands separators, yield `None`.
    pub fn clean_amount(&self, raw: &str) -> Option<String> {
        let compact = raw.trim().replace(' ', "");
        let caps = self.amount_re.captures(&compact)?;
        let integer = caps["int"].replace('.', "");
        Some(format!("{}{}.{}", &caps["sign"], integer, &caps["frac"]))
    }

    fn clean_amount_cell(&self, cell: Option<&RawCell>) -> Option<String> {
        let text = cell?.as_text()?;
        self.clean_amount(&text)
    }

    fn clean_date_cell(&self, cell: Option<&RawCell>, field: RowField) -> Result<PartialDate, SkipReason> {
        let text = cell.and_then(RawCell::as_text);
        match text.as_deref().and_then(|t| self.clean_date(t)) {
            Some(date) => Ok(date),
            None => Err(SkipReason::InvalidDate { field, value: text }),
        }
    }

    /// Turn one normalized row into a movement, or say why it was dropped.
    ///
    /// Checks run in a fixed order: required fields, balance marker, dates.
    /// Amount and balance never reject a row; an unparseable amount is kept
    /// as absent and classifies the movement as an expense.
    pub fn clean_row(&self, row: &NormalizedRow) -> RowOutcome {
        match self.try_clean_row(row) {
            Ok(record) => RowOutcome::Accepted(record),
            Err(reason) => RowOutcome::Skipped(reason),
        }
    }

    fn try_clean_row(&self, row: &NormalizedRow) -> Result<MovementRecord, SkipReason> {
        required_text(row.transaction_date_raw.as_ref(), RowField::TransactionDate)?;
        let concept_raw = required_text(row.concept_raw.as_ref(), RowField::Concept)?;

        if is_balance_record(&concept_raw) {
            return Err(SkipReason::BalanceRecord);
        }

        let transaction_date =
            self.clean_date_cell(row.transaction_date_raw.as_ref(), RowField::TransactionDate)?;
        let value_date = self.clean_date_cell(row.value_date_raw.as_ref(), RowField::ValueDate)?;

        let amount = self.clean_amount_cell(row.amount_raw.as_ref());
        let balance = self.clean_amount_cell(row.balance_raw.as_ref());
        let movement_type = MovementType::from_amount(amount.as_deref());

        Ok(MovementRecord {
            transaction_date,
            value_date,
            concept: clean_concept(&concept_raw),
            amount,
            balance,
            movement_type,
        })
    }
}

/// Collapse line breaks and whitespace runs into single spaces, then trim.
pub fn clean_concept(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_balance_record(concept: &str) -> bool {
    concept.trim().to_uppercase().contains(BALANCE_MARKER)
}

fn required_text(cell: Option<&RawCell>, field: RowField) -> Result<String, SkipReason> {
    cell.and_then(RawCell::as_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or(SkipReason::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> RowCleaner {
        RowCleaner::new().unwrap()
    }

    fn row(cells: [Option<RawCell>; 5]) -> NormalizedRow {
        let [transaction_date_raw, value_date_raw, concept_raw, amount_raw, balance_raw] = cells;
        NormalizedRow {
            transaction_date_raw,
            value_date_raw,
            concept_raw,
            amount_raw,
            balance_raw,
        }
    }

    fn text(s: &str) -> Option<RawCell> {
        Some(RawCell::from(s))
    }

    #[test]
    fn test_clean_date_pads_and_is_idempotent() {
        let c = cleaner();
        assert_eq!(c.clean_date("5/7").unwrap().to_string(), "05/07");
        assert_eq!(c.clean_date("05/07").unwrap().to_string(), "05/07");
        assert_eq!(c.clean_date("  31/12 ").unwrap().to_string(), "31/12");
    }

    #[test]
    fn test_clean_date_rejects_bad_input() {
        let c = cleaner();
        for bad in ["0/5", "5/0", "32/1", "15/13", "5-7", "", "5/7/2024", "123/4", "a/b", "12/3 10:00"] {
            assert_eq!(c.clean_date(bad), None, "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        let c = cleaner();
        assert_eq!(c.clean_date("５/７"), None);
        assert_eq!(c.clean_date("٥/٧"), None);
        assert_eq!(c.clean_amount("４５,００"), None);
    }

    #[test]
    fn test_clean_amount_spanish_locale() {
        let c = cleaner();
        assert_eq!(c.clean_amount("1.234,56").as_deref(), Some("1234.56"));
        assert_eq!(c.clean_amount("-45,00").as_deref(), Some("-45.00"));
        assert_eq!(c.clean_amount("7,50").as_deref(), Some("7.50"));
        assert_eq!(c.clean_amount(" 1 . 200 , 00 ").as_deref(), Some("1200.00"));
        assert_eq!(c.clean_amount("-1.234.567,89").as_deref(), Some("-1234567.89"));
    }

    #[test]
    fn test_clean_amount_rejects_other_shapes() {
        let c = cleaner();
        for bad in ["7,5", "7,500", "1234,56", "1,234.56", "12.34,00", "", "abc", "+5,00", "45"] {
            assert_eq!(c.clean_amount(bad), None, "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_clean_concept() {
        assert_eq!(clean_concept("PAGO\nTARJETA"), "PAGO TARJETA");
        assert_eq!(clean_concept("  TRANSF\r\n  NOMINA \t ACME  "), "TRANSF NOMINA ACME");
        assert_eq!(clean_concept(" \n "), "");
    }

    #[test]
    fn test_balance_marker_is_case_insensitive() {
        assert!(is_balance_record("  saldo anterior "));
        assert!(is_balance_record("SALDO ANTERIOR AL 01/03"));
        assert!(!is_balance_record("SALDO"));
    }

    #[test]
    fn test_clean_row_card_payment() {
        let r = row([text("12/3"), text("13/3"), text("PAGO\nTARJETA"), text("-45,00"), text("980,00")]);
        let RowOutcome::Accepted(m) = cleaner().clean_row(&r) else {
            panic!("row should be accepted");
        };
        assert_eq!(m.transaction_date.to_string(), "12/03");
        assert_eq!(m.value_date.to_string(), "13/03");
        assert_eq!(m.concept, "PAGO TARJETA");
        assert_eq!(m.amount.as_deref(), Some("-45.00"));
        assert_eq!(m.balance.as_deref(), Some("980.00"));
        assert_eq!(m.movement_type, MovementType::Expense);
    }

    #[test]
    fn test_clean_row_income() {
        let r = row([text("1/4"), text("1/4"), text("NOMINA"), text("1.500,00"), None]);
        let RowOutcome::Accepted(m) = cleaner().clean_row(&r) else {
            panic!("row should be accepted");
        };
        assert_eq!(m.movement_type, MovementType::Income);
        assert_eq!(m.balance, None);
    }

    #[test]
    fn test_clean_row_missing_fields() {
        let c = cleaner();
        let no_date = row([None, text("1/1"), text("X"), text("1,00"), None]);
        assert_eq!(
            c.clean_row(&no_date),
            RowOutcome::Skipped(SkipReason::MissingField { field: RowField::TransactionDate })
        );
        let blank_concept = row([text("1/1"), text("1/1"), text("   "), text("1,00"), None]);
        assert_eq!(
            c.clean_row(&blank_concept),
            RowOutcome::Skipped(SkipReason::MissingField { field: RowField::Concept })
        );
        let null_concept = row([text("1/1"), text("1/1"), Some(RawCell::Null), None, None]);
        assert!(matches!(c.clean_row(&null_concept), RowOutcome::Skipped(_)));
    }

    #[test]
    fn test_clean_row_balance_record_wins_over_bad_dates() {
        let r = row([text("xx"), text("yy"), text("Saldo Anterior"), text("1.200,00"), None]);
        assert_eq!(cleaner().clean_row(&r), RowOutcome::Skipped(SkipReason::BalanceRecord));
    }

    #[test]
    fn test_clean_row_rejects_invalid_value_date() {
        let r = row([text("5/7"), text("5-7"), text("COMPRA"), text("-3,00"), None]);
        assert_eq!(
            cleaner().clean_row(&r),
            RowOutcome::Skipped(SkipReason::InvalidDate {
                field: RowField::ValueDate,
                value: Some("5-7".into()),
            })
        );
        let absent = row([text("5/7"), None, text("COMPRA"), None, None]);
        assert_eq!(
            cleaner().clean_row(&absent),
            RowOutcome::Skipped(SkipReason::InvalidDate { field: RowField::ValueDate, value: None })
        );
    }

    #[test]
    fn test_clean_row_unparseable_amount_is_expense() {
        let r = row([text("5/7"), text("5/7"), text("COMISION"), Some(RawCell::Number(12.5)), text("n/a")]);
        let RowOutcome::Accepted(m) = cleaner().clean_row(&r) else {
            panic!("row should be accepted");
        };
        assert_eq!(m.amount, None);
        assert_eq!(m.balance, None);
        assert_eq!(m.movement_type, MovementType::Expense);
    }
}
