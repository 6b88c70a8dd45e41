//! Patron model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Patron model from database
///
/// Rows are created implicitly on first checkout and never deleted, so loan
/// history stays attributable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Patron {
    pub id: i32,
    pub name: String,
    pub organization: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Patron search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PatronQuery {
    /// Name fragment to match against
    pub name: String,
}
