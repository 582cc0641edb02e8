use super::*;
use crate::net::types::Role;

#[test]
fn decode_reads_encoded_user() {
    let user = SessionUser {
        id: "7".to_owned(),
        name: "Ana".to_owned(),
        email: "ana@example.com".to_owned(),
        role: Role::Analyst,
    };
    let raw = encode(&user).unwrap();
    assert_eq!(decode(&raw), Some(user));
}

#[test]
fn decode_rejects_corrupt_entries() {
    assert_eq!(decode("not json"), None);
    assert_eq!(decode(r#"{"id":"1"}"#), None);
}

#[test]
fn load_is_empty_outside_browser() {
    assert_eq!(load(), None);
}
