use super::*;

#[test]
fn discrepancy_endpoints_encode_ids() {
    assert_eq!(discrepancy_endpoint("d-1"), "/api/recon/discrepancies/d-1");
    assert_eq!(discrepancy_endpoint("a/b c"), "/api/recon/discrepancies/a%2Fb%20c");
    assert_eq!(discrepancy_status_endpoint("42"), "/api/recon/discrepancies/42/status");
}

#[test]
fn process_endpoint_formats_expected_path() {
    assert_eq!(process_endpoint("conciliacion_diaria"), "/api/recon/processes/conciliacion_diaria");
}

#[test]
fn download_url_encodes_file_name() {
    assert_eq!(download_url("cierre mayo.csv"), "/api/recon/files/cierre%20mayo.csv");
}

#[test]
fn failure_message_prefers_error_field() {
    assert_eq!(failure_message(404, r#"{"error":"no such file"}"#), "no such file");
}

#[test]
fn failure_message_falls_back_to_status() {
    assert_eq!(failure_message(502, "<html>bad gateway</html>"), "request failed: 502");
    assert_eq!(failure_message(500, r#"{"error":"  "}"#), "request failed: 500");
}

#[test]
fn api_failure_unauthorized_detection() {
    assert!(ApiFailure { status: 401, message: "x".to_owned() }.is_unauthorized());
    assert!(!ApiFailure::network("offline").is_unauthorized());
    assert_eq!(ApiFailure::network("offline").to_string(), "offline");
}
