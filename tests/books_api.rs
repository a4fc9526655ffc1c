//! End-to-end tests of the books HTTP surface against in-process stores.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shelf_app::bootstrap;
use shelf_db::{Book, BookId, BookStore, DbError, MemoryBookStore, NewBook};
use tower::ServiceExt;

fn app(store: Arc<dyn BookStore>) -> Router {
    shelf_http::build_router(&bootstrap::build_registry(store))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn create(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/create_books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, get("/api/books")).await;
    assert_eq!(status, StatusCode::OK);
    body["data"].as_array().unwrap().clone()
}

/// Counts every storage call made through it.
#[derive(Default)]
struct CountingStore {
    inner: MemoryBookStore,
    calls: AtomicUsize,
}

#[async_trait]
impl BookStore for CountingStore {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create(book).await
    }

    async fn list(&self) -> Result<Vec<Book>, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list().await
    }

    async fn get(&self, id: BookId) -> Result<Book, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }

    async fn delete(&self, id: BookId) -> Result<(), DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

/// Fails every call the way an exhausted pool does.
struct UnavailableStore;

#[async_trait]
impl BookStore for UnavailableStore {
    async fn create(&self, _book: NewBook) -> Result<Book, DbError> {
        Err(DbError::Query(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self) -> Result<Vec<Book>, DbError> {
        Err(DbError::Query(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: BookId) -> Result<Book, DbError> {
        Err(DbError::Query(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: BookId) -> Result<(), DbError> {
        Err(DbError::Query(sqlx::Error::PoolTimedOut))
    }
}

#[tokio::test]
async fn create_then_list_returns_the_new_book() {
    let app = app(Arc::new(MemoryBookStore::new()));

    let (status, body) = send(&app, create(r#"{"author":"A","title":"T","publisher":"P"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "book has been added" }));

    let (status, body) = send(&app, get("/api/books")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "books fetched successfully");
    assert_eq!(
        body["data"],
        json!([{ "id": 1, "author": "A", "title": "T", "publisher": "P" }])
    );
}

#[tokio::test]
async fn each_create_adds_one_record_with_a_fresh_id() {
    let app = app(Arc::new(MemoryBookStore::new()));

    for (n, title) in ["Dune", "Emma", "Dune"].into_iter().enumerate() {
        let before = list(&app).await.len();
        let payload = json!({ "author": "X", "title": title, "publisher": "Y" }).to_string();

        let (status, _) = send(&app, create(&payload)).await;
        assert_eq!(status, StatusCode::OK);

        let books = list(&app).await;
        assert_eq!(books.len(), before + 1);
        assert_eq!(books[n]["title"], title);
    }

    let mut ids: Vec<i64> = list(&app)
        .await
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn empty_strings_are_accepted() {
    let app = app(Arc::new(MemoryBookStore::new()));

    let (status, _) = send(&app, create(r#"{"author":"","title":"","publisher":""}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list(&app).await[0]["title"], "");
}

#[tokio::test]
async fn malformed_create_bodies_are_unprocessable_and_store_nothing() {
    let store = Arc::new(CountingStore::default());
    let app = app(store.clone());

    let without_content_type = Request::builder()
        .method(Method::POST)
        .uri("/api/create_books")
        .body(Body::from(r#"{"author":"A","title":"T","publisher":"P"}"#))
        .unwrap();

    let requests = vec![
        create("not json"),
        create(r#"{"author":"A","title":"T"}"#),
        create(r#"{"author":"A","title":1,"publisher":"P"}"#),
        create("[]"),
        without_content_type,
    ];

    for request in requests {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "message": "request failed" }));
    }

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn get_by_id_returns_the_stored_record_every_time() {
    let app = app(Arc::new(MemoryBookStore::new()));
    send(&app, create(r#"{"author":"A","title":"T","publisher":"P"}"#)).await;
    send(&app, create(r#"{"author":"B","title":"U","publisher":"Q"}"#)).await;

    let first = send(&app, get("/api/get_books/2")).await;
    let second = send(&app, get("/api/get_books/2")).await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first.1["message"], "book id fetched successfully");
    assert_eq!(
        first.1["data"],
        json!({ "id": 2, "author": "B", "title": "U", "publisher": "Q" })
    );
    assert_eq!(first, second);
}

#[tokio::test]
async fn deleted_book_can_no_longer_be_fetched() {
    let app = app(Arc::new(MemoryBookStore::new()));
    send(&app, create(r#"{"author":"A","title":"T","publisher":"P"}"#)).await;

    let (status, body) = send(&app, delete("/api/delete_book/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "books delete successfully" }));

    let (status, body) = send(&app, get("/api/get_books/1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Could not get the book" }));
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn deleting_an_unknown_id_is_a_bad_request() {
    let app = app(Arc::new(MemoryBookStore::new()));

    let (status, body) = send(&app, delete("/api/delete_book/404")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Could not delete book" }));
}

#[tokio::test]
async fn empty_id_is_a_server_error_without_touching_storage() {
    let store = Arc::new(CountingStore::default());
    let app = app(store.clone());

    for request in [
        get("/api/get_books/"),
        get("/api/get_books/%20"),
        delete("/api/delete_book/"),
        delete("/api/delete_book/%20"),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "id can not be empty" }));
    }

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_numeric_id_collapses_into_the_operation_error() {
    let app = app(Arc::new(MemoryBookStore::new()));

    let (status, body) = send(&app, get("/api/get_books/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Could not get the book");

    let (status, body) = send(&app, delete("/api/delete_book/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Could not delete book");
}

#[tokio::test]
async fn storage_failures_are_bad_requests_with_generic_messages() {
    let app = app(Arc::new(UnavailableStore));

    let cases = [
        (
            create(r#"{"author":"A","title":"T","publisher":"P"}"#),
            "Could not create book",
        ),
        (get("/api/books"), "Do not get the books"),
        (get("/api/get_books/1"), "Could not get the book"),
        (delete("/api/delete_book/1"), "Could not delete book"),
    ];

    for (request, message) in cases {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": message }));
        assert!(!body.to_string().contains("timed out"));
    }
}

#[tokio::test]
async fn openapi_document_lists_book_routes() {
    let app = app(Arc::new(MemoryBookStore::new()));

    let (status, doc) = send(&app, get("/docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);

    for path in [
        "/api/create_books",
        "/api/books",
        "/api/get_books/{id}",
        "/api/delete_book/{id}",
    ] {
        assert!(doc["paths"][path].is_object(), "missing {path}");
    }
}
