//! Circulation endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{CheckoutReceipt, CheckoutRequest, LoanDetails},
};

use super::Authenticated;

/// Return response with the closed loan
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    /// Loan details
    pub loan: LoanDetails,
}

/// Check out a book to a patron
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Copy checked out", body = CheckoutReceipt),
        (status = 400, description = "Missing fields or due date not after checkout"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "No copies left in stock")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    _auth: Authenticated,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<CheckoutReceipt>)> {
    let receipt = state.services.circulation.checkout(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Return a borrowed copy
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Loan ID")
    ),
    responses(
        (status = 200, description = "Copy returned", body = ReturnResponse),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    _auth: Authenticated,
    Path(loan_id): Path<i32>,
) -> AppResult<Json<ReturnResponse>> {
    let loan = state.services.circulation.return_loan(loan_id).await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        loan,
    }))
}

/// List loans currently out
#[utoipa::path(
    get,
    path = "/loans/active",
    tag = "loans",
    responses(
        (status = 200, description = "Active loans, newest checkout first", body = Vec<LoanDetails>)
    )
)]
pub async fn list_active(State(state): State<crate::AppState>) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.circulation.list_active().await?;
    Ok(Json(loans))
}

/// List return history
#[utoipa::path(
    get,
    path = "/loans/history",
    tag = "loans",
    responses(
        (status = 200, description = "Closed loans, newest return first", body = Vec<LoanDetails>)
    )
)]
pub async fn list_history(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.circulation.list_history().await?;
    Ok(Json(loans))
}
