//! Name-based field access into application rows.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::value::Value;

/// A row the table can read fields from.
///
/// Fields are addressed by name. A name the row does not know about reads
/// as [`Value::Null`]; columns naming nonexistent fields render empty cells
/// rather than failing.
pub trait Record {
    /// Read the field called `name`.
    fn field(&self, name: &str) -> Value;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Value {
        (**self).field(name)
    }
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Value {
        self.get(name).map(Value::from).unwrap_or(Value::Null)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Value {
        self.get(name).map(Value::from).unwrap_or(Value::Null)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or(Value::Null)
    }
}

/// Split a JSON array of objects into individual records.
///
/// Every element must be a JSON object; the first one that is not is
/// reported with its position.
pub fn records_from_json(json: serde_json::Value) -> Result<Vec<serde_json::Value>, CoreError> {
    let items = match json {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(CoreError::Serialization(format!(
                "expected an array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(CoreError::InvalidRecord {
                index,
                reason: format!("expected an object, found {}", json_kind(item)),
            });
        }
    }

    Ok(items)
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_access() {
        let row = json!({"id": 1, "name": "Bob"});
        assert_eq!(row.field("id"), Value::Int(1));
        assert_eq!(row.field("name"), Value::from("Bob"));
        assert_eq!(row.field("missing"), Value::Null);
    }

    #[test]
    fn test_non_object_reads_null() {
        assert_eq!(json!(42).field("id"), Value::Null);
    }

    #[test]
    fn test_map_field_access() {
        let mut row = BTreeMap::new();
        row.insert("age".to_string(), Value::Int(30));
        assert_eq!(row.field("age"), Value::Int(30));
        assert!(row.field("name").is_null());
    }

    #[test]
    fn test_records_from_json() {
        let rows = records_from_json(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(rows.len(), 2);

        let err = records_from_json(json!([{"id": 1}, "oops"])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { index: 1, .. }));

        let err = records_from_json(json!({"id": 1})).unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
