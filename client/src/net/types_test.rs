use super::*;

#[test]
fn session_user_accepts_numeric_id() {
    let user: SessionUser =
        serde_json::from_str(r#"{"id":42,"name":"Ana","email":"ana@example.com","role":"admin"}"#).unwrap();
    assert_eq!(user.id, "42");
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn session_user_rejects_object_id() {
    let err = serde_json::from_str::<SessionUser>(r#"{"id":{},"name":"a","email":"a@b","role":"viewer"}"#).unwrap_err();
    assert!(err.to_string().contains("expected string or number id"));
}

#[test]
fn role_unknown_values_map_to_unknown() {
    let role: Role = serde_json::from_str(r#""superuser""#).unwrap();
    assert_eq!(role, Role::Unknown);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Analyst).unwrap(), r#""analyst""#);
    assert_eq!(Role::Viewer.label(), "viewer");
}

#[test]
fn login_response_accepts_access_token_alias() {
    let resp: LoginResponse = serde_json::from_str(
        r#"{"access_token":"t0k","user":{"id":"u1","name":"Ana","email":"ana@example.com","role":"analyst"}}"#,
    )
    .unwrap();
    assert_eq!(resp.token, "t0k");
    assert_eq!(resp.user.role, Role::Analyst);
}
