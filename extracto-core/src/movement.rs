//! Movement records: the typed output of statement extraction

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A day and month without a year. Statement tables carry no year column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartialDate {
    day: u32,
    month: u32,
}

impl PartialDate {
    /// Day in 1..=31 and month in 1..=12, otherwise `None`.
    ///
    /// Day/month combinations are not cross-checked (`31/02` is accepted);
    /// that only becomes decidable once a year is known, see [`PartialDate::with_year`].
    pub fn new(day: u32, month: u32) -> Option<Self> {
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            Some(Self { day, month })
        } else {
            None
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Resolve against a statement year. `None` if the date does not exist in that year.
    pub fn with_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePartialDateError(String);

impl fmt::Display for ParsePartialDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid DD/MM date: {:?}", self.0)
    }
}

impl std::error::Error for ParsePartialDateError {}

impl FromStr for PartialDate {
    type Err = ParsePartialDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePartialDateError(s.to_string());
        let (d, m) = s.split_once('/').ok_or_else(err)?;
        let day: u32 = d.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        PartialDate::new(day, month).ok_or_else(err)
    }
}

impl Serialize for PartialDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PartialDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction of a movement, derived from the sign of its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    #[serde(rename = "I")]
    Income,
    #[serde(rename = "E")]
    Expense,
}

impl MovementType {
    /// Strictly positive amounts are income. Zero, negative, absent and
    /// unparseable amounts all fall back to expense.
    pub fn from_amount(amount: Option<&str>) -> Self {
        match amount.and_then(|a| a.parse::<f64>().ok()) {
            Some(v) if v > 0.0 => MovementType::Income,
            _ => MovementType::Expense,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MovementType::Income => "I",
            MovementType::Expense => "E",
        }
    }
}

/// One cleaned statement line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub transaction_date: PartialDate,
    pub value_date: PartialDate,
    /// Single-line, whitespace-collapsed description
    pub concept: String,
    /// Dot-decimal with sign, e.g. `-45.00`
    pub amount: Option<String>,
    /// Running balance in the same form as `amount`
    pub balance: Option<String>,
    pub movement_type: MovementType,
}

impl MovementRecord {
    pub fn amount_value(&self) -> Option<f64> {
        self.amount.as_deref().and_then(|a| a.parse().ok())
    }

    pub fn balance_value(&self) -> Option<f64> {
        self.balance.as_deref().and_then(|b| b.parse().ok())
    }

    pub fn is_income(&self) -> bool {
        self.movement_type == MovementType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.movement_type == MovementType::Expense
    }
}
