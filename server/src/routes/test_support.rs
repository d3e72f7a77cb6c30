//! Fakes shared by the route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Response;
use http_body_util::BodyExt;
use protocol::credentials::{Credentials, SessionUser};

use crate::config::Config;
use crate::services::identity::{IdentityError, IdentityProvider, IdentitySession, SignUpOutcome};
use crate::services::medai::MedaiUpstream;
use crate::state::AppState;

pub(crate) const TOKEN: &str = "valid-token";
pub(crate) const EMAIL: &str = "user@example.com";
pub(crate) const PASSWORD: &str = "Passw0rd!";

pub(crate) fn user() -> SessionUser {
    SessionUser { id: "user-1".to_owned(), email: Some(EMAIL.to_owned()) }
}

fn session() -> IdentitySession {
    IdentitySession { access_token: TOKEN.to_owned(), expires_in: Some(3600), user: user() }
}

#[derive(Default)]
pub(crate) struct FakeIdentity {
    pub down: bool,
    pub require_confirmation: bool,
    pub signed_out: Mutex<Vec<String>>,
    pub recoveries: Mutex<Vec<(String, String)>>,
    pub password_updates: Mutex<Vec<String>>,
}

impl FakeIdentity {
    fn check_up(&self) -> Result<(), IdentityError> {
        if self.down {
            return Err(IdentityError::Upstream("status 503".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<IdentitySession, IdentityError> {
        self.check_up()?;
        if credentials.email == EMAIL && credentials.password == PASSWORD {
            Ok(session())
        } else {
            Err(IdentityError::Rejected("Invalid login credentials".to_owned()))
        }
    }

    async fn sign_up(&self, _credentials: &Credentials) -> Result<SignUpOutcome, IdentityError> {
        self.check_up()?;
        if self.require_confirmation {
            Ok(SignUpOutcome::PendingConfirmation)
        } else {
            Ok(SignUpOutcome::SignedIn(session()))
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<SessionUser, IdentityError> {
        self.check_up()?;
        if access_token == TOKEN {
            Ok(user())
        } else {
            Err(IdentityError::Rejected("invalid JWT".to_owned()))
        }
    }

    async fn send_recovery(&self, email: &str, redirect_to: &str) -> Result<(), IdentityError> {
        self.check_up()?;
        self.recoveries.lock().unwrap().push((email.to_owned(), redirect_to.to_owned()));
        Ok(())
    }

    async fn update_password(&self, access_token: &str, password: &str) -> Result<(), IdentityError> {
        self.check_up()?;
        if access_token != TOKEN {
            return Err(IdentityError::Rejected("token expired".to_owned()));
        }
        self.password_updates.lock().unwrap().push(password.to_owned());
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.signed_out.lock().unwrap().push(access_token.to_owned());
        Ok(())
    }
}

pub(crate) fn config(upstream: &str) -> Config {
    let upstream = upstream.to_owned();
    Config::from_lookup(|key| match key {
        "MEDAI_API_BASE_URL" => Some(upstream.clone()),
        "IDENTITY_URL" => Some("http://identity.invalid".to_owned()),
        "IDENTITY_ANON_KEY" => Some("anon-key".to_owned()),
        "PUBLIC_URL" => Some("https://medai.example.com".to_owned()),
        _ => None,
    })
    .unwrap()
}

pub(crate) fn app(identity: Arc<FakeIdentity>, upstream: &str) -> Router {
    let config = config(upstream);
    let medai = MedaiUpstream::new(reqwest::Client::new(), &config);
    super::api_routes(AppState::new(config, identity, medai))
}

pub(crate) fn session_header() -> String {
    format!("{}={TOKEN}", super::auth::COOKIE_NAME)
}

pub(crate) async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub(crate) async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
