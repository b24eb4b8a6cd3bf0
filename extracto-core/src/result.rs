//! Call-level result of one extraction

use serde::{Deserialize, Serialize};

use crate::movement::MovementRecord;

/// Outcome of one extraction call.
///
/// Per-row skips are not errors: `errors` is only populated when the whole
/// call failed, and then `movements` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub movements: Vec<MovementRecord>,
    pub total_movements: usize,
    pub errors: Vec<String>,
}

impl ExtractionResult {
    pub fn succeeded(movements: Vec<MovementRecord>) -> Self {
        Self {
            success: true,
            total_movements: movements.len(),
            movements,
            errors: Vec::new(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            movements: Vec::new(),
            total_movements: 0,
            errors: vec![error.into()],
        }
    }
}
