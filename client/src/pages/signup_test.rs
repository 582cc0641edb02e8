use super::*;

#[test]
fn validate_signup_input_trims_name_and_email() {
    assert_eq!(
        validate_signup_input(" Bea ", " bea@example.com ", "password1", "password1"),
        Ok(SignupInput {
            name: "Bea".to_owned(),
            email: "bea@example.com".to_owned(),
            password: "password1".to_owned(),
        })
    );
}

#[test]
fn validate_signup_input_requires_all_fields() {
    assert_eq!(
        validate_signup_input("", "bea@example.com", "password1", "password1"),
        Err("Completa todos los campos.")
    );
    assert_eq!(
        validate_signup_input("Bea", "bea@example.com", "", ""),
        Err("Completa todos los campos.")
    );
}

#[test]
fn validate_signup_input_checks_email_and_password_rules() {
    assert_eq!(
        validate_signup_input("Bea", "bea", "password1", "password1"),
        Err("El correo no es válido.")
    );
    assert_eq!(
        validate_signup_input("Bea", "bea@example.com", "short", "short"),
        Err("La contraseña debe tener al menos 8 caracteres.")
    );
    assert_eq!(
        validate_signup_input("Bea", "bea@example.com", "password1", "password2"),
        Err("Las contraseñas no coinciden.")
    );
}
