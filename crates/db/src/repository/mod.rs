//! Book storage seam.
//!
//! Handlers depend on [`BookStore`] only; [`PgBookStore`] backs it in
//! production and [`MemoryBookStore`] keeps everything in process.

mod memory;
mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

use async_trait::async_trait;

use crate::models::{Book, BookId, NewBook};
use crate::DbError;

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a book and return it with its assigned id.
    async fn create(&self, book: NewBook) -> Result<Book, DbError>;

    /// Every stored book, ordered by id.
    async fn list(&self) -> Result<Vec<Book>, DbError>;

    /// Fetch one book. `DbError::NotFound` if no row has this id.
    async fn get(&self, id: BookId) -> Result<Book, DbError>;

    /// Physically remove one book. `DbError::NotFound` if no row was deleted.
    async fn delete(&self, id: BookId) -> Result<(), DbError>;
}
