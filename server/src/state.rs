//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the loaded configuration, the identity provider behind a trait
//! object (so tests can substitute a fake), and the upstream MedAI client.

use std::sync::Arc;

use crate::config::Config;
use crate::services::identity::IdentityProvider;
use crate::services::medai::MedaiUpstream;

/// Clone is required by Axum; every field is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub identity: Arc<dyn IdentityProvider>,
    pub medai: Arc<MedaiUpstream>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, identity: Arc<dyn IdentityProvider>, medai: MedaiUpstream) -> Self {
        Self { config: Arc::new(config), identity, medai: Arc::new(medai) }
    }
}
