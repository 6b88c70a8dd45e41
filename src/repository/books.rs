//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "book_id, title, category, author, publisher, published_year, \
                            total_copies, available_copies, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, book_id: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE book_id = $1"
        ))
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
    }

    /// List the whole catalog, newest catalog keys first
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY book_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Insert a new book with all copies available
    ///
    /// The insert itself resolves the duplicate check; a concurrent insert of
    /// the same key cannot slip between a pre-check and the write.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books
                (book_id, title, category, author, publisher, published_year,
                 total_copies, available_copies)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ON CONFLICT (book_id) DO NOTHING
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.book_id)
        .bind(&book.title)
        .bind(&book.category)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.published_year)
        .bind(book.total_copies)
        .fetch_optional(&self.pool)
        .await?;

        created.ok_or_else(|| {
            AppError::Conflict(format!("Book {} already exists", book.book_id))
        })
    }

    /// Update descriptive fields only; copy counters are owned by the ledger
    pub async fn update(&self, book_id: &str, update: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                category = COALESCE($3, category),
                author = COALESCE($4, author),
                updated_at = $5
            WHERE book_id = $1
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(book_id)
        .bind(&update.title)
        .bind(&update.category)
        .bind(&update.author)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
    }

    /// Delete a book unless an active loan still references it
    ///
    /// Takes the same row lock as checkout, so the guard check and the delete
    /// see one consistent snapshot: a concurrent checkout either commits
    /// before the lock is granted (delete rejected) or blocks until the
    /// delete commits (checkout gets NotFound).
    pub async fn delete(&self, book_id: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, String>("SELECT book_id FROM books WHERE book_id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))?;

        let has_active_loans: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1 AND status = 'active')",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if has_active_loans {
            return Err(AppError::Conflict(format!(
                "Book {} cannot be deleted while copies are out on loan",
                book_id
            )));
        }

        sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
