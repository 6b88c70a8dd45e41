//! Loans repository: the circulation ledger
//!
//! Checkout and Return are each one transaction that takes an exclusive lock
//! on the book row before touching `available_copies`, so the counter and the
//! loan row always change together or not at all.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{CheckoutReceipt, CheckoutRequest, Loan, LoanDetails, LoanStatus},
    },
};

use super::patrons::PatronsRepository;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
    patrons: PatronsRepository,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>, patrons: PatronsRepository) -> Self {
        Self { pool, patrons }
    }

    /// Check out one copy of a book to a patron
    ///
    /// The book row is locked before the stock check, so two concurrent
    /// checkouts on the last copy serialize: the first decrements to zero,
    /// the second re-reads zero under the lock and gets OutOfStock. Every
    /// early return drops the open transaction, which rolls it back.
    pub async fn checkout(&self, req: &CheckoutRequest) -> AppResult<CheckoutReceipt> {
        let now = Utc::now();

        // checkout_date is assigned here, so the date ordering is re-checked
        // against the same clock reading that gets persisted.
        if req.due_date <= now {
            return Err(AppError::Validation(
                "due_date must be after the checkout date".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT book_id, title, category, author, publisher, published_year,
                   total_copies, available_copies, created_at, updated_at
            FROM books
            WHERE book_id = $1
            FOR UPDATE
            "#,
        )
        .bind(&req.book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", req.book_id)))?;

        if book.available_copies <= 0 {
            return Err(AppError::OutOfStock(format!(
                "No copies of {} left in stock",
                req.book_id
            )));
        }

        let patron = self
            .patrons
            .find_or_create(
                &mut tx,
                &req.patron_name,
                req.organization.as_deref(),
                req.phone.as_deref(),
            )
            .await?;

        sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1, updated_at = $2 \
             WHERE book_id = $1",
        )
        .bind(&req.book_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let loan_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO loans (book_id, patron_id, checkout_date, due_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&req.book_id)
        .bind(patron.id)
        .bind(now)
        .bind(req.due_date)
        .bind(LoanStatus::Active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(loan_id, book_id = %req.book_id, patron = %patron.name, "checkout");

        Ok(CheckoutReceipt {
            loan_id,
            checkout_date: now,
            due_date: req.due_date,
            book: Book {
                available_copies: book.available_copies - 1,
                updated_at: now,
                ..book
            },
            patron,
        })
    }

    /// Return a loan and restore the copy to stock
    ///
    /// Locks the loan row first, so a double return serializes and the loser
    /// observes Returned instead of incrementing the counter twice.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<LoanDetails> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, patron_id, checkout_date, due_date, return_date, status \
             FROM loans WHERE id = $1 FOR UPDATE",
        )
        .bind(loan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", loan_id)))?;

        if loan.status != LoanStatus::Active {
            return Err(AppError::Conflict(format!("Loan {} already returned", loan_id)));
        }

        sqlx::query("UPDATE loans SET return_date = $2, status = $3 WHERE id = $1")
            .bind(loan_id)
            .bind(now)
            .bind(LoanStatus::Returned)
            .execute(&mut *tx)
            .await?;

        // The active loan kept the book alive (delete is guarded), so this
        // row always exists.
        sqlx::query(
            "UPDATE books SET available_copies = available_copies + 1, updated_at = $2 \
             WHERE book_id = $1",
        )
        .bind(&loan.book_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let title: Option<String> =
            sqlx::query_scalar("SELECT title FROM books WHERE book_id = $1")
                .bind(&loan.book_id)
                .fetch_optional(&mut *tx)
                .await?;

        let (patron_name, phone): (String, Option<String>) = {
            let row = sqlx::query("SELECT name, phone FROM patrons WHERE id = $1")
                .bind(loan.patron_id)
                .fetch_one(&mut *tx)
                .await?;
            (row.get("name"), row.get("phone"))
        };

        tx.commit().await?;

        tracing::info!(loan_id, book_id = %loan.book_id, "return");

        Ok(LoanDetails {
            loan_id: loan.id,
            book_id: loan.book_id,
            title,
            patron_name,
            phone,
            checkout_date: loan.checkout_date,
            due_date: loan.due_date,
            return_date: Some(now),
            status: LoanStatus::Returned,
            is_overdue: now > loan.due_date,
        })
    }

    /// All loans currently out, most recent checkout first
    pub async fn list_active(&self) -> AppResult<Vec<LoanDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.book_id, b.title, p.name, p.phone,
                   l.checkout_date, l.due_date, l.return_date, l.status
            FROM loans l
            JOIN patrons p ON p.id = l.patron_id
            LEFT JOIN books b ON b.book_id = l.book_id
            WHERE l.status = 'active'
            ORDER BY l.checkout_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|row| {
                let due_date: DateTime<Utc> = row.get("due_date");
                LoanDetails {
                    loan_id: row.get("id"),
                    book_id: row.get("book_id"),
                    title: row.get("title"),
                    patron_name: row.get("name"),
                    phone: row.get("phone"),
                    checkout_date: row.get("checkout_date"),
                    due_date,
                    return_date: row.get("return_date"),
                    status: row.get("status"),
                    is_overdue: due_date < now,
                }
            })
            .collect())
    }

    /// All closed loans, most recent return first
    ///
    /// Left join on books: history outlives catalog deletion, so the title
    /// can be gone.
    pub async fn list_history(&self) -> AppResult<Vec<LoanDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.book_id, b.title, p.name, p.phone,
                   l.checkout_date, l.due_date, l.return_date, l.status
            FROM loans l
            JOIN patrons p ON p.id = l.patron_id
            LEFT JOIN books b ON b.book_id = l.book_id
            WHERE l.status = 'returned'
            ORDER BY l.return_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let due_date: DateTime<Utc> = row.get("due_date");
                let return_date: Option<DateTime<Utc>> = row.get("return_date");
                LoanDetails {
                    loan_id: row.get("id"),
                    book_id: row.get("book_id"),
                    title: row.get("title"),
                    patron_name: row.get("name"),
                    phone: row.get("phone"),
                    checkout_date: row.get("checkout_date"),
                    due_date,
                    return_date,
                    status: row.get("status"),
                    is_overdue: return_date.map(|d| d > due_date).unwrap_or(false),
                }
            })
            .collect())
    }
}
