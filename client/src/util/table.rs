//! Rendering rules for opaque backend rows.
//!
//! The backend owns the shape of every reconciliation payload, so tables
//! derive their columns from the data instead of a fixed schema.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use serde_json::Value;

const ROW_CONTAINER_KEYS: [&str; 4] = ["data", "items", "rows", "files"];

/// Extract the row list from a payload.
///
/// Accepts a bare array, or an object carrying the array under one of
/// `ROW_CONTAINER_KEYS` (first match wins). Anything else yields no rows.
#[must_use]
pub fn rows_of(payload: &Value) -> Vec<Value> {
    match payload {
        Value::Array(rows) => rows.clone(),
        Value::Object(map) => ROW_CONTAINER_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Column keys across all object rows, in first-seen order. Relies on
/// serde_json's `preserve_order` so each row keeps its wire key order.
#[must_use]
pub fn columns(rows: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        let Some(map) = row.as_object() else {
            continue;
        };
        for key in map.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Text for one table cell.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Top-level scalar fields of an object payload, for summary cards.
///
/// Row containers and other nested values are skipped.
#[must_use]
pub fn scalar_fields(payload: &Value) -> Vec<(String, String)> {
    let Some(map) = payload.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k.clone(), cell_text(v)))
        .collect()
}

/// Identifier of a row, read from `id` as a string or number.
#[must_use]
pub fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
