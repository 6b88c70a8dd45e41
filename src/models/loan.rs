//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::Book, patron::Patron};

/// Loan lifecycle status
///
/// Active transitions exactly once to Returned; there is no other transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i32,
    pub book_id: String,
    pub patron_id: i32,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
}

/// Checkout request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "book_id is required"))]
    pub book_id: String,
    #[validate(length(min = 1, message = "patron_name is required"))]
    pub patron_name: String,
    pub organization: Option<String>,
    pub phone: Option<String>,
    /// Must be strictly after the checkout timestamp
    pub due_date: DateTime<Utc>,
}

/// Snapshot returned by a successful checkout
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub loan_id: i32,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub book: Book,
    pub patron: Patron,
}

/// Loan joined with book and patron for the circulation views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanDetails {
    pub loan_id: i32,
    pub book_id: String,
    /// None when the book was removed from the catalog after the loan closed
    pub title: Option<String>,
    pub patron_name: String,
    pub phone: Option<String>,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub is_overdue: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LoanStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&LoanStatus::Returned).unwrap(), "\"returned\"");
    }

    #[test]
    fn checkout_request_requires_book_and_patron() {
        let req = CheckoutRequest {
            book_id: String::new(),
            patron_name: "Alice".into(),
            organization: None,
            phone: None,
            due_date: Utc::now(),
        };
        assert!(req.validate().is_err());
    }
}
