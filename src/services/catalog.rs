//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalog with all copies available
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(&book).await
    }

    /// Get a single book
    pub async fn get_book(&self, book_id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(book_id).await
    }

    /// List the whole catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Update descriptive fields of a book
    pub async fn update_book(&self, book_id: &str, update: UpdateBook) -> AppResult<Book> {
        self.repository.books.update(book_id, &update).await
    }

    /// Remove a book; rejected while any copy is out on loan
    pub async fn delete_book(&self, book_id: &str) -> AppResult<()> {
        self.repository.books.delete(book_id).await
    }
}
