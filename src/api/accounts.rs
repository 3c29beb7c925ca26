//! Account and social graph endpoints

use axum::{
    Router,
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use super::dto::{UpdateAvatarRequest, UpdateBiographyRequest};
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::AccountProfile;
use crate::error::AppError;
use crate::service::{AccountService, SocialGraphService};

/// POST /api/accounts/:id/follow
pub async fn follow_account(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(followed_id): Path<String>,
) -> Result<StatusCode, AppError> {
    SocialGraphService::new(state.db.clone())
        .follow(&principal.id, &followed_id)
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /api/accounts/:id/follow
pub async fn unfollow_account(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(followed_id): Path<String>,
) -> Result<StatusCode, AppError> {
    SocialGraphService::new(state.db.clone())
        .unfollow(&principal.id, &followed_id)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /api/accounts/:handle
///
/// Public profile with follower/following counts and whether the viewer
/// follows this account.
pub async fn get_account(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(handle): Path<String>,
) -> Result<Json<AccountProfile>, AppError> {
    let profile = AccountService::new(state.db.clone())
        .profile(&handle, &principal.id)
        .await?;

    Ok(Json(profile))
}

/// POST /api/accounts/biography
pub async fn update_biography(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(request): Json<UpdateBiographyRequest>,
) -> Result<StatusCode, AppError> {
    AccountService::new(state.db.clone())
        .update_biography(&principal.id, request.biography)
        .await?;

    Ok(StatusCode::OK)
}

/// POST /api/accounts/avatar
///
/// Stores the avatar URL reference; the object store holding the image
/// is an external collaborator.
pub async fn update_avatar(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(request): Json<UpdateAvatarRequest>,
) -> Result<StatusCode, AppError> {
    AccountService::new(state.db.clone())
        .update_avatar(&principal.id, &request.avatar_url)
        .await?;

    Ok(StatusCode::OK)
}

/// Create accounts router
pub fn accounts_router() -> Router<AppState> {
    Router::new()
        .route("/biography", post(update_biography))
        .route("/avatar", post(update_avatar))
        .route("/:handle", get(get_account))
        .route("/:id/follow", post(follow_account))
        .route("/:id/follow", delete(unfollow_account))
}
