//! Embedded schema migrations.
//!
//! The SQL files under `crates/db/migrations` are compiled into the binary.
//! sqlx records applied versions with their checksums in `_sqlx_migrations`
//! and holds a Postgres advisory lock while it runs, so concurrent startups
//! apply each version exactly once.

use sqlx::{migrate::Migrator, PgPool};
use tracing::info;

use crate::DbError;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Bring the schema up to date. Already-applied versions are skipped.
///
/// Fails with [`DbError::Migration`] when a version cannot be applied or an
/// applied version no longer matches its embedded SQL.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    info!(known = MIGRATOR.iter().count(), "running database migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}
