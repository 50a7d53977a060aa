//! Users dataset shown by the demo tables.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tessera_core::{records_from_json, Record, Value};

use crate::error::DemoError;

/// Account status of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row of the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub joined: Option<NaiveDate>,
}

impl User {
    /// Whether the user's name or email contains `query`, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

impl Record for User {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => Value::from(self.id),
            "name" => Value::from(self.name.as_str()),
            "email" => Value::from(self.email.as_str()),
            "age" => Value::from(self.age),
            "role" => Value::from(self.role.as_str()),
            "status" => Value::from(self.status.as_str()),
            // ISO dates sort chronologically as text.
            "joined" => Value::from(self.joined.map(|d| d.format("%Y-%m-%d").to_string())),
            _ => Value::Null,
        }
    }
}

fn user(
    id: u32,
    name: &str,
    email: &str,
    age: Option<u32>,
    role: &str,
    status: UserStatus,
    joined: (i32, u32, u32),
) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        age,
        role: role.to_string(),
        status,
        joined: NaiveDate::from_ymd_opt(joined.0, joined.1, joined.2),
    }
}

/// Built-in dataset.
pub fn sample_users() -> Vec<User> {
    use UserStatus::*;

    vec![
        user(1, "John Doe", "john@example.com", Some(30), "Admin", Active, (2023, 1, 15)),
        user(2, "Jane Smith", "jane@example.com", Some(25), "Editor", Active, (2023, 3, 2)),
        user(3, "Bob Johnson", "bob@example.com", Some(35), "Viewer", Inactive, (2022, 11, 20)),
        user(4, "Amy Chen", "amy@example.com", Some(28), "Editor", Pending, (2024, 2, 8)),
        user(5, "Élodie Martin", "elodie@example.com", None, "Viewer", Active, (2023, 7, 30)),
        user(6, "carlos ruiz", "carlos@example.com", Some(42), "Admin", Inactive, (2021, 5, 12)),
        user(7, "Priya Patel", "priya@example.com", Some(31), "Viewer", Active, (2024, 6, 1)),
        user(8, "Zoe Williams", "zoe@example.com", Some(23), "Editor", Pending, (2024, 9, 18)),
    ]
}

/// Parse a JSON array of user objects.
pub fn parse_users(text: &str) -> Result<Vec<User>, DemoError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    records_from_json(json)?
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(DemoError::from))
        .collect()
}

/// Load users from a JSON file.
pub fn load_users(path: &Path) -> Result<Vec<User>, DemoError> {
    let text = std::fs::read_to_string(path)?;
    parse_users(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tessera_core::CoreError;

    #[test]
    fn test_sample_users_have_unique_ids() {
        let users = sample_users();
        let ids: HashSet<u32> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), users.len());
        assert!(users.iter().all(|u| u.joined.is_some()));
    }

    #[test]
    fn test_user_record_fields() {
        let users = sample_users();
        let jane = &users[1];
        assert_eq!(jane.field("id"), Value::Int(2));
        assert_eq!(jane.field("name"), Value::from("Jane Smith"));
        assert_eq!(jane.field("age"), Value::Int(25));
        assert_eq!(jane.field("status"), Value::from("active"));
        assert_eq!(jane.field("joined"), Value::from("2023-03-02"));
        assert_eq!(jane.field("salary"), Value::Null);
        assert_eq!(users[4].field("age"), Value::Null);
    }

    #[test]
    fn test_matches_name_or_email() {
        let users = sample_users();
        assert!(users[0].matches("JOHN"));
        assert!(users[1].matches("jane@"));
        assert!(users[1].matches("  "));
        assert!(!users[1].matches("bob"));
    }

    #[test]
    fn test_parse_users() {
        let users = parse_users(
            r#"[
                {"id": 1, "name": "Ann", "email": "ann@example.com", "age": 40, "status": "pending", "joined": "2024-01-31"},
                {"id": 2, "name": "Ben", "email": "ben@example.com"}
            ]"#,
        )
        .unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].status, UserStatus::Pending);
        assert_eq!(users[0].joined, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(users[1].age, None);
        assert_eq!(users[1].status, UserStatus::Active);
    }

    #[test]
    fn test_parse_users_rejects_non_array() {
        let err = parse_users(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, DemoError::Dataset(CoreError::Serialization(_))));

        let err = parse_users(r#"[{"id": 1, "name": "a", "email": "b"}, 7]"#).unwrap_err();
        assert!(matches!(
            err,
            DemoError::Dataset(CoreError::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn test_parse_users_rejects_bad_fields() {
        let err = parse_users(r#"[{"id": "one", "name": "a", "email": "b"}]"#).unwrap_err();
        assert!(matches!(err, DemoError::Json(_)));

        let err = parse_users("not json").unwrap_err();
        assert!(matches!(err, DemoError::Json(_)));
    }

    #[test]
    fn test_load_users_missing_file() {
        let err = load_users(Path::new("/nonexistent/tessera/users.json")).unwrap_err();
        assert!(matches!(err, DemoError::Io(_)));
    }
}
