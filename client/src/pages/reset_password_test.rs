use super::*;
use protocol::credentials::PASSWORD_POLICY_MESSAGE;

#[test]
fn missing_token_is_rejected_first() {
    let err = validate_reset_input(None, "Str0ng!pw", "Str0ng!pw").unwrap_err();
    assert!(err.contains("invalid"));
    assert!(validate_reset_input(Some(""), "Str0ng!pw", "Str0ng!pw").is_err());
}

#[test]
fn weak_password_reports_policy() {
    assert_eq!(validate_reset_input(Some("tok"), "weak", "weak"), Err(PASSWORD_POLICY_MESSAGE.to_owned()));
}

#[test]
fn mismatched_confirmation_is_rejected() {
    assert_eq!(
        validate_reset_input(Some("tok"), "Str0ng!pw", "Str0ng!pw2"),
        Err("Passwords do not match.".to_owned())
    );
}

#[test]
fn valid_input_builds_update() {
    assert_eq!(
        validate_reset_input(Some("tok"), "Str0ng!pw", "Str0ng!pw"),
        Ok(PasswordUpdate { access_token: "tok".to_owned(), password: "Str0ng!pw".to_owned() })
    );
}

#[test]
fn checklist_marks_each_rule() {
    let rows = rule_checklist("abc");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], (PasswordRule::MinLength, false));
    assert_eq!(rows[4], (PasswordRule::AllowedCharacters, true));
    assert!(rule_checklist("Str0ng!pw").iter().all(|(_, ok)| *ok));
}
