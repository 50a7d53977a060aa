//! Tessera Core
//!
//! Renderer-agnostic logic behind the Tessera table widget:
//! - Dynamically typed field values and name-based record access
//! - Row identity derivation (field key or caller function)
//! - Stable, locale-aware sorting of a display projection
//! - Identity-keyed selection bookkeeping
//!
//! Nothing in this crate draws to a terminal. The widgets crate layers
//! ratatui rendering and callbacks on top of [`TableEngine`].

pub mod collate;
pub mod engine;
pub mod error;
pub mod identity;
pub mod record;
pub mod selection;
pub mod sort;
pub mod value;

// Re-export commonly used types
pub use collate::locale_compare;
pub use engine::{TableEngine, TableView};
pub use error::CoreError;
pub use identity::{RowId, RowKey};
pub use record::{records_from_json, Record};
pub use selection::Selection;
pub use sort::{compare_values, display_order, SortConfig, SortDirection};
pub use value::Value;
