use super::*;

#[test]
fn greeting_uses_local_part_of_email() {
    assert_eq!(greeting(Some("ada@example.com")), "Welcome back, ada");
}

#[test]
fn greeting_without_usable_email_is_generic() {
    assert_eq!(greeting(None), "Welcome back");
    assert_eq!(greeting(Some("@example.com")), "Welcome back");
}
