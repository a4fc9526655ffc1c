//! HTTP handlers for the books module.
//!
//! Storage errors are logged here and replaced by a fixed message; a missing
//! row and a failing database produce the same 400.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use shelf_db::BookStore;
use shelf_http::{ApiData, ApiMessage, AppError};

use super::models::{Book, BookId, CreateBookRequest};

pub const REQUEST_FAILED: &str = "request failed";
pub const BOOK_ADDED: &str = "book has been added";
pub const CREATE_FAILED: &str = "Could not create book";
pub const BOOKS_FETCHED: &str = "books fetched successfully";
pub const LIST_FAILED: &str = "Do not get the books";
pub const BOOK_FETCHED: &str = "book id fetched successfully";
pub const GET_FAILED: &str = "Could not get the book";
pub const BOOK_DELETED: &str = "books delete successfully";
pub const DELETE_FAILED: &str = "Could not delete book";
pub const ID_EMPTY: &str = "id can not be empty";

/// Router state shared by every books handler.
#[derive(Clone)]
pub struct BooksState {
    store: Arc<dyn BookStore>,
}

impl BooksState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

/// `POST /create_books`
pub async fn create_book(
    State(state): State<BooksState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<ApiMessage, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "create payload rejected");
        AppError::unprocessable(REQUEST_FAILED)
    })?;

    let book = state.store.create(request.into()).await.map_err(|err| {
        tracing::warn!(error = %err, "could not create book");
        AppError::bad_request(CREATE_FAILED)
    })?;

    tracing::info!(book_id = book.id, "book created");
    Ok(ApiMessage::new(BOOK_ADDED))
}

/// `GET /books`
pub async fn list_books(
    State(state): State<BooksState>,
) -> Result<ApiData<Vec<Book>>, AppError> {
    let books = state.store.list().await.map_err(|err| {
        tracing::warn!(error = %err, "could not list books");
        AppError::bad_request(LIST_FAILED)
    })?;

    Ok(ApiData::new(BOOKS_FETCHED, books))
}

/// `GET /get_books/{id}`
pub async fn get_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<ApiData<Book>, AppError> {
    fetch(&state, &id).await
}

/// `GET /get_books/`
pub async fn get_book_without_id(
    State(state): State<BooksState>,
) -> Result<ApiData<Book>, AppError> {
    fetch(&state, "").await
}

/// `DELETE /delete_book/{id}`
pub async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> Result<ApiMessage, AppError> {
    remove(&state, &id).await
}

/// `DELETE /delete_book/`
pub async fn delete_book_without_id(
    State(state): State<BooksState>,
) -> Result<ApiMessage, AppError> {
    remove(&state, "").await
}

async fn fetch(state: &BooksState, raw_id: &str) -> Result<ApiData<Book>, AppError> {
    let id = parse_id(raw_id, GET_FAILED)?;

    let book = state.store.get(id).await.map_err(|err| {
        tracing::warn!(book_id = id, error = %err, "could not get book");
        AppError::bad_request(GET_FAILED)
    })?;

    Ok(ApiData::new(BOOK_FETCHED, book))
}

async fn remove(state: &BooksState, raw_id: &str) -> Result<ApiMessage, AppError> {
    let id = parse_id(raw_id, DELETE_FAILED)?;

    state.store.delete(id).await.map_err(|err| {
        tracing::warn!(book_id = id, error = %err, "could not delete book");
        AppError::bad_request(DELETE_FAILED)
    })?;

    tracing::info!(book_id = id, "book deleted");
    Ok(ApiMessage::new(BOOK_DELETED))
}

/// Blank ids are a 500; ids that are not integers get the operation's 400,
/// the same answer the database gives for an unknown id.
fn parse_id(raw_id: &str, failure: &'static str) -> Result<BookId, AppError> {
    let raw_id = raw_id.trim();
    if raw_id.is_empty() {
        return Err(AppError::internal(ID_EMPTY));
    }

    raw_id.parse::<BookId>().map_err(|err| {
        tracing::debug!(raw_id, error = %err, "book id is not an integer");
        AppError::bad_request(failure)
    })
}
