//! Row structs that map onto the `books` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Storage-assigned primary key of a book.
pub type BookId = i64;

/// A persisted book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: BookId,
    pub author: String,
    pub title: String,
    pub publisher: String,
}

/// Column values for a book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub author: String,
    pub title: String,
    pub publisher: String,
}

impl NewBook {
    pub(crate) fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            author: self.author,
            title: self.title,
            publisher: self.publisher,
        }
    }
}
