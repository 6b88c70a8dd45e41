//! Repository layer for database operations

pub mod books;
pub mod loans;
pub mod patrons;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub patrons: patrons::PatronsRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        let patrons = patrons::PatronsRepository::new(pool.clone());
        Self {
            books: books::BooksRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone(), patrons.clone()),
            patrons,
            pool,
        }
    }
}
