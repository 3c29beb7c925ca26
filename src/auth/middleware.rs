//! Authentication middleware
//!
//! Resolves the bearer token into a `Principal` before any core
//! operation runs. Handlers using the `CurrentUser` extractor never see
//! unauthenticated requests.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

use super::token::{Principal, verify_token};
use crate::AppState;
use crate::error::AppError;

fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(ToOwned::to_owned)
}

/// Extractor for the current authenticated principal
///
/// # Usage
/// ```ignore
/// async fn handler(
///     CurrentUser(principal): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}", principal.handle)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Extract and verify the bearer token from the Authorization header
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>().cloned() {
            return Ok(CurrentUser(principal));
        }

        let state = AppState::from_ref(state);
        let token = extract_token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
        let principal = verify_token(&token, &state.config.auth.token_secret)?;
        parts.extensions.insert(principal.clone());

        Ok(CurrentUser(principal))
    }
}
