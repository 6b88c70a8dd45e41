//! Patron lookup endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::patron::{Patron, PatronQuery},
};

/// Search patrons by name fragment (autocomplete, at most 5 results)
#[utoipa::path(
    get,
    path = "/patrons/search",
    tag = "patrons",
    params(PatronQuery),
    responses(
        (status = 200, description = "Matching patrons", body = Vec<Patron>)
    )
)]
pub async fn search_patrons(
    State(state): State<crate::AppState>,
    Query(query): Query<PatronQuery>,
) -> AppResult<Json<Vec<Patron>>> {
    let patrons = state.services.patrons.search(&query.name).await?;
    Ok(Json(patrons))
}
