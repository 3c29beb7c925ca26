//! Request and response DTOs
//!
//! Every operation has an explicit typed request body; nothing in the
//! core ever reads loosely-typed JSON. Timeline and search responses
//! serialize the viewer-annotated models directly.

use serde::{Deserialize, Serialize};

/// POST /api/auth/register
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub handle: String,
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub handle: String,
    pub password: String,
}

/// Login response carrying the signed bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/posts
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    /// Present when this post is a reply
    #[serde(default)]
    pub parent_post_id: Option<String>,
}

/// Response for created posts
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedPostResponse {
    pub id: String,
}

/// POST /api/accounts/biography
#[derive(Debug, Deserialize)]
pub struct UpdateBiographyRequest {
    pub biography: String,
}

/// POST /api/accounts/avatar
#[derive(Debug, Deserialize)]
pub struct UpdateAvatarRequest {
    pub avatar_url: String,
}

/// Pagination query parameters shared by timeline endpoints
#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
}

/// GET /api/search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// "accounts" or "posts"
    pub kind: String,
    /// Search text; empty yields an empty result set
    #[serde(default)]
    pub query: String,
    pub page: Option<u32>,
}
