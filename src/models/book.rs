//! Book (catalog) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
///
/// `available_copies` is owned by the circulation ledger: it only changes
/// inside the same transaction that opens or closes a loan, and always stays
/// within `0..=total_copies`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Externally assigned catalog key, e.g. "B001"
    pub book_id: String,
    pub title: String,
    pub category: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i16>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "book_id is required"))]
    pub book_id: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub category: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i16>,
    #[validate(range(min = 1, message = "total_copies must be at least 1"))]
    pub total_copies: i32,
}

/// Update book request
///
/// Only descriptive fields; the copy counters are never reachable from here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_book_rejects_zero_copies() {
        let req = CreateBook {
            book_id: "B001".into(),
            title: "Dune".into(),
            category: None,
            author: None,
            publisher: None,
            published_year: None,
            total_copies: 0,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_book_rejects_empty_title() {
        let req = CreateBook {
            book_id: "B001".into(),
            title: String::new(),
            category: None,
            author: None,
            publisher: None,
            published_year: None,
            total_copies: 3,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn create_book_accepts_minimal_fields() {
        let req = CreateBook {
            book_id: "B001".into(),
            title: "Dune".into(),
            category: None,
            author: None,
            publisher: None,
            published_year: Some(1965),
            total_copies: 1,
        };
        assert!(req.validate().is_ok());
    }
}
