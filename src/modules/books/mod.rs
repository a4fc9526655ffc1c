pub mod handlers;
pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use shelf_db::BookStore;
use shelf_kernel::{InitCtx, Module};

use handlers::BooksState;

/// Books module: the CRUD surface over the `books` table
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            state: BooksState::new(store),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/create_books", post(handlers::create_book))
            .route("/books", get(handlers::list_books))
            .route("/get_books/", get(handlers::get_book_without_id))
            .route("/get_books/{id}", get(handlers::get_book))
            .route("/delete_book/", delete(handlers::delete_book_without_id))
            .route("/delete_book/{id}", delete(handlers::delete_book))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let message = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/MessageResponse" }
                    }
                }
            })
        };
        let id_parameter = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });

        Some(json!({
            "paths": {
                "/create_books": {
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": message("Book stored"),
                            "400": message("Storage failure"),
                            "422": message("Malformed body")
                        }
                    }
                },
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every stored book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookList" }
                                    }
                                }
                            },
                            "400": message("Storage failure")
                        }
                    }
                },
                "/get_books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [id_parameter.clone()],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookEnvelope" }
                                    }
                                }
                            },
                            "400": message("Unknown id or storage failure"),
                            "500": message("Empty id")
                        }
                    }
                },
                "/delete_book/{id}": {
                    "delete": {
                        "summary": "Delete a book by id",
                        "tags": ["Books"],
                        "parameters": [id_parameter],
                        "responses": {
                            "200": message("Book removed"),
                            "400": message("Unknown id or storage failure"),
                            "500": message("Empty id")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "author": { "type": "string" },
                            "title": { "type": "string" },
                            "publisher": { "type": "string" }
                        },
                        "required": ["id", "author", "title", "publisher"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "author": { "type": "string" },
                            "title": { "type": "string" },
                            "publisher": { "type": "string" }
                        },
                        "required": ["author", "title", "publisher"]
                    },
                    "BookList": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "data": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["message", "data"]
                    },
                    "BookEnvelope": {
                        "type": "object",
                        "properties": {
                            "message": { "type": "string" },
                            "data": { "$ref": "#/components/schemas/Book" }
                        },
                        "required": ["message", "data"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
