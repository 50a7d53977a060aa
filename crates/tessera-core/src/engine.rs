//! Sort and selection state of one table instance.
//!
//! The engine never stores rows. Every operation takes the host's current
//! rows and derives the display projection again, so results always reflect
//! what is on screen.

use std::collections::HashSet;

use crate::identity::{RowId, RowKey};
use crate::record::Record;
use crate::selection::Selection;
use crate::sort::{display_order, SortConfig};

/// What a table shows, first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableView {
    /// Loading indicator only.
    Loading,
    /// Empty-state text only.
    Empty,
    /// Header and rows.
    Populated,
}

impl TableView {
    pub fn resolve(loading: bool, row_count: usize) -> Self {
        if loading {
            Self::Loading
        } else if row_count == 0 {
            Self::Empty
        } else {
            Self::Populated
        }
    }
}

/// Sort configuration, selection set and identity rule of a table.
#[derive(Debug)]
pub struct TableEngine<T> {
    sort: SortConfig,
    selection: Selection,
    row_key: RowKey<T>,
}

impl<T> Default for TableEngine<T> {
    fn default() -> Self {
        Self {
            sort: SortConfig::default(),
            selection: Selection::new(),
            row_key: RowKey::default(),
        }
    }
}

impl<T> Clone for TableEngine<T> {
    fn clone(&self) -> Self {
        Self {
            sort: self.sort.clone(),
            selection: self.selection.clone(),
            row_key: self.row_key.clone(),
        }
    }
}

impl<T: Record> TableEngine<T> {
    /// Create an engine with no sort and an empty selection.
    pub fn new(row_key: RowKey<T>) -> Self {
        Self {
            sort: SortConfig::default(),
            selection: Selection::new(),
            row_key,
        }
    }

    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    pub fn row_key(&self) -> &RowKey<T> {
        &self.row_key
    }

    pub fn set_row_key(&mut self, row_key: RowKey<T>) {
        self.row_key = row_key;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Apply a header click. Non-sortable headers are ignored.
    ///
    /// Returns true if the sort configuration changed.
    pub fn click_header(&mut self, field: &str, sortable: bool) -> bool {
        if !sortable {
            return false;
        }
        self.sort.click(field);
        true
    }

    /// Indices into `rows` in display order.
    pub fn display_order(&self, rows: &[T]) -> Vec<usize> {
        display_order(rows, &self.sort)
    }

    /// Rows in display order.
    pub fn display_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        self.display_order(rows).into_iter().map(|i| &rows[i]).collect()
    }

    /// Identity of each displayed row, in display order.
    pub fn display_ids(&self, rows: &[T]) -> Vec<RowId> {
        self.display_rows(rows)
            .into_iter()
            .enumerate()
            .map(|(index, row)| self.row_key.resolve(row, index))
            .collect()
    }

    /// Whether the row shown at `display_index` is selected.
    pub fn is_selected(&self, rows: &[T], display_index: usize) -> bool {
        self.display_ids(rows)
            .get(display_index)
            .is_some_and(|id| self.selection.contains(id))
    }

    /// Number of selected identities among the displayed rows.
    pub fn selected_count(&self, rows: &[T]) -> usize {
        let visible: HashSet<RowId> = self.display_ids(rows).into_iter().collect();
        self.selection.count_in(&visible)
    }

    /// Whether the select-all header checkbox is checked.
    pub fn header_checked(&self, rows: &[T]) -> bool {
        !rows.is_empty() && self.selected_count(rows) == rows.len()
    }

    /// Displayed rows whose identity is selected, in display order.
    pub fn selected_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        let ids = self.display_ids(rows);
        self.display_rows(rows)
            .into_iter()
            .zip(ids)
            .filter(|(_, id)| self.selection.contains(id))
            .map(|(row, _)| row)
            .collect()
    }

    /// Flip selection of the row shown at `display_index`.
    ///
    /// Returns the selected displayed rows afterwards, or `None` if the
    /// index is out of range.
    pub fn toggle_row<'a>(&mut self, rows: &'a [T], display_index: usize) -> Option<Vec<&'a T>> {
        let id = self.display_ids(rows).into_iter().nth(display_index)?;
        self.selection.toggle(id);
        Some(self.selected_rows(rows))
    }

    /// Select every displayed row, or clear if all are already selected.
    ///
    /// Returns the selected displayed rows afterwards.
    pub fn toggle_all<'a>(&mut self, rows: &'a [T]) -> Vec<&'a T> {
        if self.header_checked(rows) || rows.is_empty() {
            self.selection.clear();
            return Vec::new();
        }
        let ids = self.display_ids(rows);
        self.selection.select_exactly(ids);
        self.display_rows(rows)
    }

    /// Drop selected identities that are no longer displayed.
    ///
    /// Returns the surviving selected rows if anything was dropped.
    pub fn reconcile<'a>(&mut self, rows: &'a [T]) -> Option<Vec<&'a T>> {
        let visible: HashSet<RowId> = self.display_ids(rows).into_iter().collect();
        if self.selection.retain_visible(&visible) == 0 {
            return None;
        }
        Some(self.selected_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use serde_json::{json, Value as Json};

    fn users() -> Vec<Json> {
        vec![
            json!({"id": 1, "name": "John Doe", "email": "john@example.com"}),
            json!({"id": 2, "name": "Jane Smith", "email": "jane@example.com"}),
            json!({"id": 3, "name": "Bob Johnson", "email": "bob@example.com"}),
        ]
    }

    fn ids(rows: &[&Json]) -> Vec<i64> {
        rows.iter()
            .filter_map(|r| r.field("id").as_i64())
            .collect()
    }

    #[test]
    fn test_view_precedence() {
        assert_eq!(TableView::resolve(true, 3), TableView::Loading);
        assert_eq!(TableView::resolve(true, 0), TableView::Loading);
        assert_eq!(TableView::resolve(false, 0), TableView::Empty);
        assert_eq!(TableView::resolve(false, 1), TableView::Populated);
    }

    #[test]
    fn test_non_sortable_click_ignored() {
        let mut engine = TableEngine::<Json>::default();
        assert!(!engine.click_header("name", false));
        assert_eq!(engine.sort(), &SortConfig::default());
        assert!(engine.click_header("name", true));
        assert!(engine.sort().is_sorted_by("name"));
    }

    #[test]
    fn test_toggle_row_reports_selected_rows() {
        let rows = users();
        let mut engine = TableEngine::default();

        let selected = engine.toggle_row(&rows, 0).unwrap();
        assert_eq!(ids(&selected), vec![1]);

        let selected = engine.toggle_row(&rows, 2).unwrap();
        assert_eq!(ids(&selected), vec![1, 3]);

        let selected = engine.toggle_row(&rows, 0).unwrap();
        assert_eq!(ids(&selected), vec![3]);

        assert!(engine.toggle_row(&rows, 9).is_none());
    }

    #[test]
    fn test_selection_follows_display_order() {
        let rows = users();
        let mut engine = TableEngine::default();
        engine.set_sort(SortConfig::by("name", SortDirection::Ascending));

        // Display order: Bob (3), Jane (2), John (1)
        engine.toggle_row(&rows, 0);
        let selected = engine.toggle_row(&rows, 2).unwrap();
        assert_eq!(ids(&selected), vec![3, 1]);
        assert!(engine.is_selected(&rows, 0));
        assert!(!engine.is_selected(&rows, 1));
    }

    #[test]
    fn test_select_all_twice_clears() {
        let rows = users();
        let mut engine = TableEngine::default();

        let all = engine.toggle_all(&rows);
        assert_eq!(ids(&all), vec![1, 2, 3]);
        assert!(engine.header_checked(&rows));

        let none = engine.toggle_all(&rows);
        assert!(none.is_empty());
        assert!(!engine.header_checked(&rows));
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_select_all_after_partial_selects_everything() {
        let rows = users();
        let mut engine = TableEngine::default();
        engine.toggle_row(&rows, 1);
        assert!(!engine.header_checked(&rows));
        assert_eq!(engine.toggle_all(&rows).len(), 3);
    }

    #[test]
    fn test_header_unchecked_when_empty() {
        let engine = TableEngine::<Json>::default();
        assert!(!engine.header_checked(&[]));
    }

    #[test]
    fn test_custom_row_key_selects_single_row() {
        let rows = users();
        let mut engine = TableEngine::new(RowKey::func(|r: &Json| {
            RowId::from(r.field("email").to_string())
        }));

        let selected = engine.toggle_row(&rows, 1).unwrap();
        assert_eq!(selected, vec![&rows[1]]);
        assert!(engine.selection().contains(&RowId::from("jane@example.com")));
    }

    #[test]
    fn test_rows_without_id_use_position() {
        let rows = vec![json!({"name": "a"}), json!({"name": "b"})];
        let mut engine = TableEngine::default();
        engine.toggle_row(&rows, 1);
        assert!(engine.selection().contains(&RowId::Number(1)));
    }

    #[test]
    fn test_duplicate_ids_merge() {
        let rows = vec![json!({"id": 1, "n": "a"}), json!({"id": 1, "n": "b"})];
        let mut engine = TableEngine::default();
        let selected = engine.toggle_row(&rows, 0).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(engine.is_selected(&rows, 1));
    }

    #[test]
    fn test_stale_selection_is_reconciled() {
        let rows = users();
        let mut engine = TableEngine::default();
        engine.toggle_all(&rows);

        // Host filters John out.
        let filtered: Vec<Json> = rows[1..].to_vec();
        assert!(engine.header_checked(&filtered));
        assert_eq!(engine.selected_count(&filtered), 2);

        let surviving = engine.reconcile(&filtered).unwrap();
        assert_eq!(ids(&surviving), vec![2, 3]);
        assert_eq!(engine.selection().len(), 2);
        assert!(engine.reconcile(&filtered).is_none());
    }

    #[test]
    fn test_stale_ids_do_not_fake_all_selected() {
        let rows = users();
        let mut engine = TableEngine::default();
        engine.toggle_row(&rows, 0);
        engine.toggle_row(&rows, 1);

        // Replace the data set: only Bob plus a newcomer.
        let next = vec![rows[2].clone(), json!({"id": 4, "name": "Dana"})];
        assert!(!engine.header_checked(&next));
        assert_eq!(engine.toggle_all(&next).len(), 2);
    }
}
