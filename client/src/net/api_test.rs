use super::*;

#[test]
fn auth_paths_live_under_api_auth() {
    for path in [AUTH_ME_PATH, AUTH_LOGIN_PATH, AUTH_REGISTER_PATH, AUTH_LOGOUT_PATH, AUTH_RECOVER_PATH, AUTH_PASSWORD_PATH] {
        assert!(path.starts_with("/api/auth/"), "{path}");
    }
}

#[test]
fn rejected_credentials_get_a_specific_message() {
    assert_eq!(login_failure_message(&ApiError::Auth), "Invalid e-mail or password.");
    assert_eq!(
        login_failure_message(&ApiError::Network("status 500".to_owned())),
        "Sign-in failed. Please try again."
    );
}

#[test]
fn validation_messages_pass_through() {
    let err = ApiError::validation("Enter your password.");
    assert_eq!(login_failure_message(&err), "Enter your password.");
    assert_eq!(reset_failure_message(&err), "Enter your password.");
}

#[test]
fn expired_reset_token_is_explained() {
    assert_eq!(reset_failure_message(&ApiError::Auth), "This reset link has expired. Request a new one.");
}

#[test]
fn decode_reports_malformed_json_as_server_error() {
    let err = decode::<SessionUser>("not json").expect_err("malformed");
    assert!(matches!(err, ApiError::Server(_)));
}
