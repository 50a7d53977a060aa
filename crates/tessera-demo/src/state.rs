//! UI state for the showcase.

use crate::data::User;

/// Field slots of the showcase, in focus order.
pub const NAME_FIELD: usize = 0;
pub const PASSWORD_FIELD: usize = 1;
pub const SEARCH_FIELD: usize = 2;
pub const EMAIL_FIELD: usize = 3;
pub const FIELD_COUNT: usize = 4;

/// Widget holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Table,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(NAME_FIELD)
    }
}

impl Focus {
    /// Next widget in tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Focus::Field(i) if i + 1 < FIELD_COUNT => Focus::Field(i + 1),
            Focus::Field(_) => Focus::Table,
            Focus::Table => Focus::Field(0),
        }
    }

    /// Previous widget in tab order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Focus::Field(0) => Focus::Table,
            Focus::Field(i) => Focus::Field(i - 1),
            Focus::Table => Focus::Field(FIELD_COUNT - 1),
        }
    }
}

/// Snapshot of host-owned data for rendering.
#[derive(Debug, Default)]
pub struct UiState {
    /// Full dataset.
    pub users: Vec<User>,

    /// Users matching the search field, as handed to the table.
    pub visible: Vec<User>,

    /// Field values, indexed by field slot.
    pub values: [String; FIELD_COUNT],

    /// Widget with keyboard focus.
    pub focus: Focus,

    /// Last notification, shown in the footer.
    pub status_message: Option<String>,
}

impl UiState {
    /// Recompute the visible users from the search value.
    pub fn refilter(&mut self) {
        let query = &self.values[SEARCH_FIELD];
        self.visible = self
            .users
            .iter()
            .filter(|u| u.matches(query))
            .cloned()
            .collect();
    }
}
