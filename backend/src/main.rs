//! Backend entry-point: wires the stores, credential codec, and HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts_backend::example_data::seed_example_data_on_startup;
use contacts_backend::inbound::http::health::HealthState;
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::outbound::credentials::{
    BuildMode, JwtCredentialCodec, credential_settings_from_env,
};
use contacts_backend::outbound::memory::{InMemoryPersonRepository, InMemoryUserRepository};
use contacts_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("invalid server settings: {e}")))?;

    let credentials =
        credential_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %credentials.fingerprint(),
        ephemeral = credentials.is_ephemeral(),
        ttl_secs = credentials.ttl().as_secs(),
        "credential secret loaded"
    );
    let codec = Arc::new(JwtCredentialCodec::new(&credentials, Arc::new(DefaultClock)));
    drop(credentials);

    let persons = Arc::new(InMemoryPersonRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    seed_example_data_on_startup(settings.seed_example_data, persons.as_ref())
        .await
        .map_err(std::io::Error::other)?;

    let http_state = HttpState::from_adapters(persons, users, codec);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(settings.bind_addr(), http_state),
    )?;
    server.await
}
