//! Circulation service: checkout, return and the circulation views

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::loan::{CheckoutReceipt, CheckoutRequest, LoanDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check out one copy of a book to a patron
    ///
    /// Input shape and date ordering are rejected here, before any store
    /// access; the stock decision itself is made under the row lock inside
    /// the repository transaction.
    pub async fn checkout(&self, req: CheckoutRequest) -> AppResult<CheckoutReceipt> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if req.due_date <= Utc::now() {
            return Err(AppError::Validation(
                "due_date must be after the checkout date".to_string(),
            ));
        }

        self.repository.loans.checkout(&req).await
    }

    /// Return a borrowed copy
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<LoanDetails> {
        self.repository.loans.return_loan(loan_id).await
    }

    /// Loans currently out
    pub async fn list_active(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_active().await
    }

    /// Closed loans
    pub async fn list_history(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_history().await
    }
}
