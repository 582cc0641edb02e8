use serde_json::json;

use super::*;

#[test]
fn row_status_reads_string_status() {
    assert_eq!(row_status(&json!({ "id": 1, "status": "pending" })), "pending");
}

#[test]
fn row_status_defaults_to_empty() {
    assert_eq!(row_status(&json!({ "id": 1 })), "");
    assert_eq!(row_status(&json!({ "id": 1, "status": 3 })), "");
}
