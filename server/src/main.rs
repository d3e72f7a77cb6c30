mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use config::{Config, ConfigError};
use services::identity::GoTrueClient;
use services::medai::{MedaiUpstream, build_http_client};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Leptos(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    tracing_subscriber::fmt::init();
    if !dotenv_loaded {
        tracing::debug!("no .env file; using process environment");
    }

    if let Err(e) = run().await {
        tracing::error!(error = %e, "medai server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let http = build_http_client(&config)?;
    let identity = Arc::new(GoTrueClient::new(http.clone(), &config));
    let medai = MedaiUpstream::new(http, &config);
    let port = config.port;
    tracing::info!(upstream = %config.medai_api_base_url, public_url = %config.public_url, "configuration loaded");

    let state = state::AppState::new(config, identity, medai);
    let app = routes::leptos_app(state).map_err(StartupError::Leptos)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(%port, "medai listening");
    axum::serve(listener, app).await?;
    Ok(())
}
