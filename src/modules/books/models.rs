use serde::{Deserialize, Serialize};

pub use shelf_db::{Book, BookId};
use shelf_db::NewBook;

/// Request model for creating a new book.
///
/// All three fields are required; empty strings are accepted. Any `id` in the
/// body is ignored since storage assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    /// Author of the book
    pub author: String,
    /// Title of the book
    pub title: String,
    /// Publisher of the book
    pub publisher: String,
}

impl From<CreateBookRequest> for NewBook {
    fn from(request: CreateBookRequest) -> Self {
        NewBook {
            author: request.author,
            title: request.title,
            publisher: request.publisher,
        }
    }
}
