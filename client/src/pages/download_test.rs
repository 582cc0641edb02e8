use serde_json::json;

use super::*;

#[test]
fn file_name_of_reads_strings_and_objects() {
    assert_eq!(file_name_of(&json!("cierre.csv")), Some("cierre.csv".to_owned()));
    assert_eq!(file_name_of(&json!({ "file_name": "visa.xlsx", "size": 10 })), Some("visa.xlsx".to_owned()));
    assert_eq!(file_name_of(&json!({ "nombre": " amex.csv " })), Some("amex.csv".to_owned()));
}

#[test]
fn file_name_of_skips_unnamed_entries() {
    assert_eq!(file_name_of(&json!({ "size": 10 })), None);
    assert_eq!(file_name_of(&json!("  ")), None);
    assert_eq!(file_name_of(&json!(7)), None);
}

#[test]
fn validate_process_input_defaults_params_to_empty_object() {
    assert_eq!(
        validate_process_input(" conciliacion_diaria ", "  "),
        Ok(("conciliacion_diaria".to_owned(), json!({})))
    );
}

#[test]
fn validate_process_input_parses_object_params() {
    let (_, params) = validate_process_input("cierre", r#"{"fecha":"2024-05-01"}"#).unwrap();
    assert_eq!(params["fecha"], "2024-05-01");
}

#[test]
fn validate_process_input_rejects_bad_names_and_params() {
    assert_eq!(validate_process_input("", ""), Err("Indica el nombre del proceso."));
    assert!(validate_process_input("run all", "").is_err());
    assert!(validate_process_input("../etc", "").is_err());
    assert_eq!(validate_process_input("cierre", "[1]"), Err("Los parámetros deben ser un objeto JSON."));
    assert_eq!(validate_process_input("cierre", "{oops"), Err("Los parámetros no son JSON válido."));
}
