use super::*;
use protocol::credentials::SessionUser;

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    assert!(should_redirect_unauth(&AuthState::signed_out()));
}

#[test]
fn should_not_redirect_while_loading() {
    assert!(!should_redirect_unauth(&AuthState::default()));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState::signed_in(SessionUser { id: "u1".to_owned(), email: None });
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn auth_error_signs_out_and_others_do_not() {
    let auth = RwSignal::new(AuthState::signed_in(SessionUser { id: "u1".to_owned(), email: None }));

    sign_out_on_auth_error(auth, &ApiError::Network("down".to_owned()));
    assert!(auth.get_untracked().user.is_some());

    sign_out_on_auth_error(auth, &ApiError::Auth);
    assert!(auth.get_untracked().needs_login());
}
