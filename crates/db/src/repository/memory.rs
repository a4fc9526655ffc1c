use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::models::{Book, BookId, NewBook};
use crate::DbError;

/// Process-local [`BookStore`]. Ids start at 1 and are never reused, like a
/// `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: BookId,
    books: BTreeMap<BookId, Book>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let book = book.into_book(state.last_id);
        state.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn list(&self) -> Result<Vec<Book>, DbError> {
        Ok(self.state.read().await.books.values().cloned().collect())
    }

    async fn get(&self, id: BookId) -> Result<Book, DbError> {
        self.state
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: BookId) -> Result<(), DbError> {
        self.state
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }
}
