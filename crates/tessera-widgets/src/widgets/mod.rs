//! Tessera widgets.

pub mod field;
pub mod table;
