use async_trait::async_trait;
use sqlx::PgPool;

use super::BookStore;
use crate::models::{Book, BookId, NewBook};
use crate::DbError;

/// [`BookStore`] over the shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (author, title, publisher)
            VALUES ($1, $2, $3)
            RETURNING id, author, title, publisher
            "#,
        )
        .bind(&book.author)
        .bind(&book.title)
        .bind(&book.publisher)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Book>, DbError> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, author, title, publisher FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: BookId) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>("SELECT id, author, title, publisher FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: BookId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
