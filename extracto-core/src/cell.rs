//! Untyped cell values as handed over by the table-extraction engine

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// One scalar cell of an extracted table.
///
/// The extraction engine gives no type guarantees: a date column may arrive
/// as text, an amount as a bare number, and empty cells as `null`. Anything
/// else (booleans, nested values) is kept as its text rendering so a single
/// odd cell never makes the whole table unreadable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Null,
}

impl RawCell {
    /// Coerce the cell to text. `Null` has no textual form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Text(s) => Some(s.clone()),
            RawCell::Number(n) => Some(n.to_string()),
            RawCell::Null => None,
        }
    }

    /// True for `Null` and for text that is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.as_text().is_none_or(|s| s.trim().is_empty())
    }
}

impl From<&Value> for RawCell {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => RawCell::Null,
            Value::String(s) => RawCell::Text(s.clone()),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| RawCell::Text(n.to_string()), RawCell::Number),
            Value::Bool(true) => RawCell::Text("True".to_string()),
            Value::Bool(false) => RawCell::Text("False".to_string()),
            nested => RawCell::Text(nested.to_string()),
        }
    }
}

impl From<RawCell> for Value {
    fn from(cell: RawCell) -> Self {
        match cell {
            RawCell::Text(s) => Value::String(s),
            RawCell::Number(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
            RawCell::Null => Value::Null,
        }
    }
}

impl<'de> Deserialize<'de> for RawCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| RawCell::from(&v))
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::Text(s)
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}
