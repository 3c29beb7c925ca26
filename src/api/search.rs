//! Search endpoint

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};

use super::dto::SearchParams;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::service::{SearchKind, SearchResults, SearchService};

/// GET /api/search?kind=accounts|posts&query=...&page=N
pub async fn search(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let kind = SearchKind::parse(&params.kind)?;
    let page = params.page.unwrap_or(1);
    let page_size = state.config.pagination.search_page_size;

    let results = SearchService::new(state.db.clone())
        .search(kind, &params.query, &principal.id, page, page_size)
        .await?;

    let body = match results {
        SearchResults::Accounts(accounts) => serde_json::to_value(accounts),
        SearchResults::Posts(posts) => serde_json::to_value(posts),
    }
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(body))
}

/// Create search router
pub fn search_router() -> Router<AppState> {
    Router::new().route("/", get(search))
}
