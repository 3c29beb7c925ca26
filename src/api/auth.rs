//! Registration and login endpoints
//!
//! The only endpoints reachable without a bearer token. Login mints the
//! signed token that the rest of the API requires.

use axum::{
    Router,
    extract::{Json, State},
    routing::post,
};

use super::dto::{LoginRequest, RegisterRequest, TokenResponse};
use crate::AppState;
use crate::auth::{Principal, create_token};
use crate::error::AppError;
use crate::metrics::ACCOUNTS_TOTAL;
use crate::service::AccountService;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let account = AccountService::new(state.db.clone())
        .register(&request.handle, &request.email, &request.password)
        .await?;

    ACCOUNTS_TOTAL.inc();

    Ok(Json(serde_json::json!({ "id": account.id })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let account = AccountService::new(state.db.clone())
        .authenticate(&request.handle, &request.password)
        .await?;

    let principal = Principal::new(
        account.id,
        account.handle.clone(),
        state.config.auth.token_max_age,
    );
    let token = create_token(&principal, &state.config.auth.token_secret)?;

    tracing::info!(handle = %account.handle, "Login succeeded");

    Ok(Json(TokenResponse { token }))
}

/// Create auth router
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
