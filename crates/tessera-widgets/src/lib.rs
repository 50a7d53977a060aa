//! Terminal widgets for Tessera.
//!
//! This crate provides two self-contained ratatui widgets:
//! - [`DataTable`] - sortable, selectable rows with custom cell renderers
//! - [`InputField`] - a host-controlled text input with label, helper and
//!   error text, a clear button and a password visibility toggle
//!
//! # Architecture
//!
//! The crate is organized into:
//! - `widgets` - the table and field widgets
//! - `theme` - colors, styles, and visual constants
//! - `style` - per-row style composition hooks
//! - `utils` - text fitting and masking utilities
//!
//! # Usage
//!
//! Widgets never own host data. The table borrows the host's rows on every
//! render and interaction; the field renders whatever value the host last
//! pushed and reports edits through its change callback.

pub mod style;
pub mod theme;
pub mod utils;
pub mod widgets;

pub use style::{compose, RowStyle};
pub use theme::{Theme, ThemeMode};
pub use utils::{display_width, fit_tail, mask};
pub use widgets::field::{FieldMessage, FieldSize, FieldVariant, InputField, InputType};
pub use widgets::table::{Align, CellRenderer, Column, DataTable};

pub use tessera_core::{Record, RowId, RowKey, SortConfig, SortDirection, TableView, Value};
