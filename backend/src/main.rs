//! Backend entry-point: wires REST endpoints, persistence adapters, and
//! OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::api_scope;
use backend::outbound::auth::{
    generate_ephemeral_secret, Argon2PasswordHasher, JwtTokenIssuer, DEFAULT_TOKEN_TTL_MINUTES,
};
use backend::outbound::persistence::{
    DbPool, DieselFareRepository, DieselFleetRepository, DieselMatatuRepository,
    DieselPaymentRepository, DieselUserRepository, PoolConfig,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

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

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    run_migrations(&database_url)?;

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let token_secret = load_token_secret()?;
    let token_ttl_minutes = env::var("TOKEN_TTL_MINUTES")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let state = web::Data::new(HttpState::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselFleetRepository::new(pool.clone())),
        Arc::new(DieselMatatuRepository::new(pool.clone())),
        Arc::new(DieselFareRepository::new(pool.clone())),
        Arc::new(DieselPaymentRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenIssuer::new(&token_secret, token_ttl_minutes)),
    ));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_state = state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_state.clone())
            .app_data(server_health_state.clone())
            .service(api_scope())
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
        app
    })
    .bind(&bind_addr)?;

    health_state.mark_ready();
    server.run().await
}

/// Apply pending migrations over a short-lived synchronous connection.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("failed to connect for migrations: {e}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    Ok(())
}

/// Read the token signing secret, falling back to an ephemeral one only in
/// development.
fn load_token_secret() -> std::io::Result<Vec<u8>> {
    let secret_path =
        env::var("TOKEN_SECRET_FILE").unwrap_or_else(|_| "/var/run/secrets/token_secret".into());
    match std::fs::read(&secret_path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let allow_dev = env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %secret_path, error = %e, "using ephemeral token secret (dev only)");
                Ok(generate_ephemeral_secret())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read token secret at {secret_path}: {e}"
                )))
            }
        }
    }
}
