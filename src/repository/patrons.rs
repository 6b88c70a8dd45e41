//! Patrons repository for database operations

use sqlx::{Pool, Postgres, Transaction};

use crate::{error::AppResult, models::patron::Patron};

#[derive(Clone)]
pub struct PatronsRepository {
    pool: Pool<Postgres>,
}

impl PatronsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Resolve a patron by name inside an open transaction, creating the row
    /// on first checkout.
    ///
    /// Two first-checkouts for the same name can race; the no-op upsert on the
    /// unique name column makes RETURNING yield whichever row won, so no
    /// duplicate patron can ever be created.
    pub async fn find_or_create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        organization: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<Patron> {
        if let Some(patron) = sqlx::query_as::<_, Patron>(
            "SELECT id, name, organization, phone, created_at FROM patrons WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?
        {
            return Ok(patron);
        }

        let patron = sqlx::query_as::<_, Patron>(
            r#"
            INSERT INTO patrons (name, organization, phone)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, organization, phone, created_at
            "#,
        )
        .bind(name)
        .bind(organization)
        .bind(phone)
        .fetch_one(&mut **tx)
        .await?;

        Ok(patron)
    }

    /// Search patrons by name fragment, capped at 5 suggestions
    pub async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Patron>> {
        let patrons = sqlx::query_as::<_, Patron>(
            r#"
            SELECT id, name, organization, phone, created_at
            FROM patrons
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY name
            LIMIT 5
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(patrons)
    }
}
