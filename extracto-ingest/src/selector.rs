//! Row selector: picks the movements table out of everything the document yielded.
//!
//! The first table of a statement is the cover/summary block; movements are
//! always the second table. This is positional and does not look at content.

use extracto_core::RawTable;

use crate::error::ExtractError;

/// Position of the movements table in the extracted table list
pub const MOVEMENTS_TABLE_INDEX: usize = 1;

pub fn select_movements_table(tables: &[RawTable]) -> Result<&RawTable, ExtractError> {
    tables
        .get(MOVEMENTS_TABLE_INDEX)
        .ok_or(ExtractError::InsufficientTables {
            expected: MOVEMENTS_TABLE_INDEX + 1,
            found: tables.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use extracto_core::RawRow;

    fn table(marker: &str) -> RawTable {
        vec![RawRow::new().with("Unnamed: 0", marker)]
    }

    #[test]
    fn test_selects_second_table() {
        let tables = vec![table("cover"), table("movements"), table("footer")];
        let selected = select_movements_table(&tables).unwrap();
        assert_eq!(selected, &table("movements"));
    }

    #[test]
    fn test_too_few_tables() {
        for tables in [vec![], vec![table("cover")]] {
            let err = select_movements_table(&tables).unwrap_err();
            assert!(matches!(
                err,
                ExtractError::InsufficientTables { expected: 2, found } if found == tables.len()
            ));
        }
    }
}
