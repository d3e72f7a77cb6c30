use super::*;

// =============================================================
// Password policy
// =============================================================

#[test]
fn strong_password_passes() {
    assert!(password_violations("Passw0rd!").is_empty());
    assert!(validate_password("Abcdefg1@").is_ok());
}

#[test]
fn short_password_reports_min_length() {
    assert_eq!(password_violations("Ab1!"), vec![PasswordRule::MinLength]);
}

#[test]
fn each_missing_class_is_reported() {
    assert_eq!(password_violations("password1!"), vec![PasswordRule::Uppercase]);
    assert_eq!(password_violations("Password!!"), vec![PasswordRule::Digit]);
    assert_eq!(password_violations("Password12"), vec![PasswordRule::Symbol]);
}

#[test]
fn characters_outside_the_allowed_set_are_rejected() {
    assert_eq!(password_violations("Password1!#"), vec![PasswordRule::AllowedCharacters]);
    assert_eq!(password_violations("Pass word1!"), vec![PasswordRule::AllowedCharacters]);
}

#[test]
fn policy_failure_uses_form_copy() {
    let err = validate_password("weak").expect_err("weak password");
    assert_eq!(err, ApiError::validation(PASSWORD_POLICY_MESSAGE));
}

#[test]
fn confirmation_must_match() {
    assert!(validate_new_password("Passw0rd!", "Passw0rd!").is_ok());
    let err = validate_new_password("Passw0rd!", "Passw0rd?").expect_err("mismatch");
    assert_eq!(err, ApiError::validation("Passwords do not match."));
}

// =============================================================
// Credentials
// =============================================================

#[test]
fn credentials_trim_email() {
    let creds = Credentials::new("  a@b.com ", "secret").expect("valid");
    assert_eq!(creds.email, "a@b.com");
}

#[test]
fn credentials_reject_blank_fields() {
    assert!(matches!(Credentials::new("", "secret"), Err(ApiError::Validation(_))));
    assert!(matches!(Credentials::new("not-an-email", "secret"), Err(ApiError::Validation(_))));
    assert!(matches!(Credentials::new("a@b.com", ""), Err(ApiError::Validation(_))));
}

// =============================================================
// Reset fragment
// =============================================================

#[test]
fn access_token_is_read_from_fragment() {
    assert_eq!(
        access_token_from_fragment("#access_token=abc.def&expires_in=3600&type=recovery"),
        Some("abc.def".to_owned())
    );
    assert_eq!(access_token_from_fragment("type=recovery&access_token=x%2Dy"), Some("x-y".to_owned()));
}

#[test]
fn missing_or_empty_token_is_none() {
    assert_eq!(access_token_from_fragment(""), None);
    assert_eq!(access_token_from_fragment("#type=recovery"), None);
    assert_eq!(access_token_from_fragment("#access_token="), None);
}

#[test]
fn sign_up_reply_without_user_means_confirmation_pending() {
    let reply: SignUpReply = serde_json::from_str("{}").expect("decode");
    assert_eq!(reply.user, None);

    let reply: SignUpReply = serde_json::from_str(r#"{"user":{"id":"u-1","email":"a@b.c"}}"#).expect("decode");
    assert_eq!(reply.user.map(|user| user.id).as_deref(), Some("u-1"));
}
