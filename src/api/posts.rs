//! Post and engagement endpoints

use axum::{
    Router,
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use super::dto::{CreatePostRequest, CreatedPostResponse};
use super::timelines;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::metrics::POSTS_TOTAL;
use crate::service::{EngagementService, PostService};

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatedPostResponse>), AppError> {
    let created = PostService::new(state.db.clone())
        .create_post(&principal.id, &request.content, request.parent_post_id)
        .await?;

    POSTS_TOTAL.inc();

    Ok((
        StatusCode::CREATED,
        Json(CreatedPostResponse { id: created.id }),
    ))
}

/// POST /api/posts/:id/like
///
/// Idempotent: 200 whether or not the like was newly applied.
pub async fn like_post(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(post_id): Path<String>,
) -> Result<StatusCode, AppError> {
    EngagementService::new(state.db.clone())
        .like(&principal.id, &post_id)
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /api/posts/:id/like
pub async fn unlike_post(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(post_id): Path<String>,
) -> Result<StatusCode, AppError> {
    EngagementService::new(state.db.clone())
        .unlike(&principal.id, &post_id)
        .await?;

    Ok(StatusCode::OK)
}

/// Create posts router
///
/// The static `/timeline` segment takes precedence over the `:handle`
/// capture.
pub fn posts_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post))
        .route("/timeline", get(timelines::home_timeline))
        .route("/:handle", get(timelines::author_timeline))
        .route("/:id/like", post(like_post))
        .route("/:id/like", delete(unlike_post))
}
