//! `shelf-db`: persistence layer.
//!
//! Connection pool factory, the embedded migration runner, book row types and
//! the [`BookStore`] implementations. No HTTP concerns live here.

pub mod connection;
pub mod error;
pub mod migrate;
pub mod models;
pub mod repository;

pub use connection::{connect, DbPool};
pub use error::DbError;
pub use migrate::{run_migrations, MIGRATOR};
pub use models::{Book, BookId, NewBook};
pub use repository::{BookStore, MemoryBookStore, PgBookStore};
