//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,
}
