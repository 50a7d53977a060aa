//! Identity-keyed selection set.

use std::collections::HashSet;

use crate::identity::RowId;

/// Set of selected row identities.
///
/// Rows sharing an identity share a membership bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<RowId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `id`. Returns true if it is now selected.
    pub fn toggle(&mut self, id: RowId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_exactly<I: IntoIterator<Item = RowId>>(&mut self, ids: I) {
        self.ids = ids.into_iter().collect();
    }

    /// Number of distinct identities in `visible` that are selected.
    pub fn count_in(&self, visible: &HashSet<RowId>) -> usize {
        visible.iter().filter(|id| self.ids.contains(*id)).count()
    }

    /// Drop identities not in `visible`. Returns how many were dropped.
    pub fn retain_visible(&mut self, visible: &HashSet<RowId>) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| visible.contains(id));
        before - self.ids.len()
    }
}
