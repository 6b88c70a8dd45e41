//! Login endpoint for the boolean is-authenticated gate

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response carrying the static API token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
}

/// Exchange the configured credentials for the API token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let auth = &state.config.auth;
    if request.username != auth.username || request.password != auth.password {
        return Err(AppError::Authentication("Bad credentials".to_string()));
    }

    Ok(Json(LoginResponse {
        token: auth.api_token.clone(),
        token_type: "Bearer".to_string(),
    }))
}
