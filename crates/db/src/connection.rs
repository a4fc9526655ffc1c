//! Postgres connection pool.

use std::time::Duration;

use shelf_kernel::settings::{DatabaseSettings, SslMode};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Build connect options from the database settings.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.dbname)
        .ssl_mode(ssl_mode(settings.sslmode))
}

fn ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

/// Open a connection pool and verify the server accepts our credentials.
///
/// The first connection is established eagerly, so an unreachable server or a
/// rejected login surfaces here rather than on the first request.
pub async fn connect(settings: &DatabaseSettings) -> Result<DbPool, DbError> {
    info!(
        url = %settings.redacted_url(),
        max_connections = settings.max_connections,
        "connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(connect_options(settings))
        .await
        .map_err(DbError::Connection)?;

    info!("database connection established");
    Ok(pool)
}
