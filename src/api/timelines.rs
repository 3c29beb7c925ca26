//! Timeline endpoints

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use super::dto::PageParams;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::ViewerPost;
use crate::error::AppError;
use crate::metrics::{
    DB_QUERIES_TOTAL, DB_QUERY_DURATION_SECONDS, HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUESTS_TOTAL,
};
use crate::service::TimelineService;

/// GET /api/posts/timeline
///
/// Home timeline: the viewer's own posts plus posts from accounts they
/// follow, newest first.
pub async fn home_timeline(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ViewerPost>>, AppError> {
    // Start timing the request
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["GET", "/api/posts/timeline"])
        .start_timer();

    let page = params.page.unwrap_or(1);
    let page_size = state.config.pagination.home_page_size;

    let db_timer = DB_QUERY_DURATION_SECONDS
        .with_label_values(&["SELECT", "posts"])
        .start_timer();
    let posts = TimelineService::new(state.db.clone())
        .home_timeline(&principal.id, page, page_size)
        .await?;
    DB_QUERIES_TOTAL
        .with_label_values(&["SELECT", "posts"])
        .inc();
    db_timer.observe_duration();

    // Record successful request
    HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/api/posts/timeline", "200"])
        .inc();

    Ok(Json(posts))
}

/// GET /api/posts/:handle
///
/// Author timeline: any authenticated viewer may read any author's
/// posts. An unknown handle yields an empty list.
pub async fn author_timeline(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(handle): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ViewerPost>>, AppError> {
    let _timer = HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&["GET", "/api/posts/:handle"])
        .start_timer();

    let page = params.page.unwrap_or(1);
    let page_size = state.config.pagination.author_page_size;

    let db_timer = DB_QUERY_DURATION_SECONDS
        .with_label_values(&["SELECT", "posts"])
        .start_timer();
    let posts = TimelineService::new(state.db.clone())
        .author_timeline(&handle, &principal.id, page, page_size)
        .await?;
    DB_QUERIES_TOTAL
        .with_label_values(&["SELECT", "posts"])
        .inc();
    db_timer.observe_duration();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/api/posts/:handle", "200"])
        .inc();

    Ok(Json(posts))
}
