use super::*;
use protocol::credentials::SessionUser;

#[test]
fn get_started_goes_to_login_without_session() {
    assert_eq!(get_started_href(&AuthState::signed_out()), "/login");
    assert_eq!(get_started_href(&AuthState::default()), "/login");
}

#[test]
fn get_started_goes_to_dashboard_with_session() {
    let state = AuthState::signed_in(SessionUser { id: "u-1".to_owned(), email: None });
    assert_eq!(get_started_href(&state), "/dashboard");
}
