use super::*;

#[test]
fn humanize_key_sentence_cases_snake_case() {
    assert_eq!(humanize_key("fecha_pago"), "Fecha pago");
    assert_eq!(humanize_key("monto-total"), "Monto total");
}

#[test]
fn humanize_key_collapses_separators() {
    assert_eq!(humanize_key("__id__"), "Id");
    assert_eq!(humanize_key("  "), "");
    assert_eq!(humanize_key("ñandu_count"), "Ñandu count");
}
