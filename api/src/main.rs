use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use ba_api::{create_app, telemetry, AppState};
use ba_core::services::auth::{AuthService, AuthServiceConfig};
use ba_core::services::clock::{Clock, SystemClock};
use ba_core::services::registration::{OsTokenGenerator, RegistrationService, RegistrationServiceConfig};
use ba_core::services::secrets::SecretProvider;
use ba_core::services::token::{TokenService, TokenServiceConfig};
use ba_infra::cache::{RedisClient, RedisVerificationStore};
use ba_infra::config::load_config;
use ba_infra::database::{DatabasePool, MySqlUserRepository};
use ba_infra::mail::LogMailer;
use ba_infra::secrets::EnvSecretProvider;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(environment = ?config.environment, "Starting BasicAuth API server");

    // Without signing secrets no session can be issued or checked
    let secrets = EnvSecretProvider::default()
        .signing_secrets()
        .context("failed to load token signing secrets")?;

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the user database")?;
    if config.database.run_migrations {
        pool.run_migrations().await.context("failed to run database migrations")?;
    }

    let redis = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to the verification store")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registration_config = RegistrationServiceConfig::new(&config.registration, &config.database, &config.mail);

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let store = Arc::new(RedisVerificationStore::new(redis, clock.clone(), registration_config.limit));
    let mailer = Arc::new(LogMailer::new(config.environment.is_development()));

    let tokens = Arc::new(TokenService::new(
        &secrets,
        TokenServiceConfig::from(&config.jwt),
        clock.clone(),
    ));

    let registration = Arc::new(RegistrationService::new(
        users.clone(),
        store,
        mailer,
        Arc::new(OsTokenGenerator::new()),
        clock,
        registration_config,
    ));
    let auth = Arc::new(AuthService::new(
        users,
        tokens,
        AuthServiceConfig::from(&config.database),
    ));

    let state = web::Data::new(AppState::new(registration, auth));
    let cors = config.cors.clone();

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    tracing::info!(stats = %pool.get_statistics(), "Server stopped");
    pool.close().await;

    Ok(())
}
