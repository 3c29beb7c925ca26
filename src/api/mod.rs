//! API layer
//!
//! HTTP handlers for:
//! - Auth (register/login)
//! - Accounts and the social graph
//! - Posts, engagement and timelines
//! - Search
//! - Metrics (Prometheus)

mod accounts;
mod auth;
mod dto;
pub mod metrics;
mod posts;
mod search;
mod timelines;

pub use dto::*;

use axum::Router;

use crate::AppState;

pub use metrics::metrics_router;

/// Create the API router
///
/// `/auth` is public; every other route authenticates via the
/// `CurrentUser` extractor in its handler.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_router())
        .nest("/accounts", accounts::accounts_router())
        .nest("/posts", posts::posts_router())
        .nest("/search", search::search_router())
}
