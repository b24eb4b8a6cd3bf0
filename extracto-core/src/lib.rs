//! extracto-core: boundary and output types for bank-statement movement extraction

pub mod cell;
pub mod movement;
pub mod result;
pub mod table;

pub use cell::RawCell;
pub use movement::{MovementRecord, MovementType, PartialDate};
pub use result::ExtractionResult;
pub use table::{NormalizedRow, RawRow, RawTable};
