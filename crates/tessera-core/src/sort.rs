//! Sort configuration and the display projection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collate::locale_compare;
use crate::record::Record;
use crate::value::Value;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Which field the rows are sorted by, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Field name of the active column. `None` preserves input order.
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// An active sort on `field`.
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(field.into()),
            direction,
        }
    }

    /// Returns true if rows are sorted by `field`.
    pub fn is_sorted_by(&self, field: &str) -> bool {
        self.column.as_deref() == Some(field)
    }

    /// Apply a header click on `field`.
    ///
    /// Clicking the active column flips the direction; any other column
    /// replaces it and starts ascending.
    pub fn click(&mut self, field: &str) {
        if self.is_sorted_by(field) {
            self.direction = self.direction.toggled();
        } else {
            self.column = Some(field.to_string());
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Order two field values for display.
///
/// Equal values (including two nulls) keep their relative order. A lone
/// null goes first ascending and last descending. Everything else is
/// compared by textual form.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match (a.is_null(), b.is_null()) {
        (true, _) => direction.apply(Ordering::Less),
        (_, true) => direction.apply(Ordering::Greater),
        _ => direction.apply(locale_compare(&a.to_string(), &b.to_string())),
    }
}

/// Compute the display projection of `rows` under `config`.
///
/// Returns indices into `rows` in display order. The sort is stable and
/// always starts from the input order, so re-sorting never depends on a
/// previous projection.
pub fn display_order<T: Record>(rows: &[T], config: &SortConfig) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let Some(field) = config.column.as_deref() else {
        return order;
    };

    let keys: Vec<Value> = rows.iter().map(|row| row.field(field)).collect();
    order.sort_by(|&i, &j| compare_values(&keys[i], &keys[j], config.direction));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn names(rows: &[Json], order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|&i| rows[i].field("name").to_string())
            .collect()
    }

    fn people() -> Vec<Json> {
        vec![
            json!({"id": 1, "name": "John Doe", "age": 30}),
            json!({"id": 2, "name": "Jane Smith", "age": 25}),
            json!({"id": 3, "name": "Bob Johnson", "age": 35}),
        ]
    }

    #[test]
    fn test_no_column_preserves_order() {
        let rows = people();
        assert_eq!(display_order(&rows, &SortConfig::default()), vec![0, 1, 2]);
    }

    #[test]
    fn test_ascending_by_name() {
        let rows = people();
        let order = display_order(&rows, &SortConfig::by("name", SortDirection::Ascending));
        assert_eq!(names(&rows, &order), ["Bob Johnson", "Jane Smith", "John Doe"]);
    }

    #[test]
    fn test_descending_by_name() {
        let rows = people();
        let order = display_order(&rows, &SortConfig::by("name", SortDirection::Descending));
        assert_eq!(names(&rows, &order), ["John Doe", "Jane Smith", "Bob Johnson"]);
    }

    #[test]
    fn test_numbers_compare_textually() {
        let rows = vec![json!({"n": 9}), json!({"n": 10}), json!({"n": 100})];
        let order = display_order(&rows, &SortConfig::by("n", SortDirection::Ascending));
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_nulls_first_ascending_last_descending() {
        let rows = vec![
            json!({"name": "Bob"}),
            json!({"name": null}),
            json!({"name": "Amy"}),
            json!({}),
        ];
        let asc = display_order(&rows, &SortConfig::by("name", SortDirection::Ascending));
        assert_eq!(asc, vec![1, 3, 2, 0]);

        let desc = display_order(&rows, &SortConfig::by("name", SortDirection::Descending));
        assert_eq!(desc, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_stable_on_ties() {
        let rows = vec![
            json!({"id": 1, "role": "User"}),
            json!({"id": 2, "role": "Admin"}),
            json!({"id": 3, "role": "User"}),
            json!({"id": 4, "role": "Admin"}),
        ];
        let asc = display_order(&rows, &SortConfig::by("role", SortDirection::Ascending));
        assert_eq!(asc, vec![1, 3, 0, 2]);
        // Descending re-sorts from the input, so ties keep input order too.
        let desc = display_order(&rows, &SortConfig::by("role", SortDirection::Descending));
        assert_eq!(desc, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_click_flips_and_replaces() {
        let mut config = SortConfig::default();
        config.click("name");
        assert_eq!(config, SortConfig::by("name", SortDirection::Ascending));
        config.click("name");
        assert_eq!(config, SortConfig::by("name", SortDirection::Descending));
        config.click("name");
        assert_eq!(config.direction, SortDirection::Ascending);

        config.click("name");
        config.click("age");
        assert_eq!(config, SortConfig::by("age", SortDirection::Ascending));
    }

    #[test]
    fn test_bob_amy_scenario() {
        let rows = vec![json!({"id": 1, "name": "Bob"}), json!({"id": 2, "name": "Amy"})];
        let mut config = SortConfig::default();

        config.click("name");
        assert_eq!(names(&rows, &display_order(&rows, &config)), ["Amy", "Bob"]);

        config.click("name");
        assert_eq!(names(&rows, &display_order(&rows, &config)), ["Bob", "Amy"]);
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(
            serde_json::to_string(&SortDirection::Descending).unwrap(),
            "\"desc\""
        );
    }
}
