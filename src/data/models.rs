//! Data models
//!
//! Rust structs representing database entities and per-request
//! viewer-annotated projections. All models use ULID for IDs and
//! chrono for timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Entity ID wrapper (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
///
/// ULIDs sort lexicographically by creation time, so `ORDER BY id DESC`
/// is a deterministic tie-break for rows sharing a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Account
// =============================================================================

/// A registered account
///
/// `id` is immutable once created, `handle` is unique. The password hash
/// never leaves the data layer in serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub handle: String,
    #[serde(skip_serializing)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub biography: Option<String>,
    /// URL reference to the avatar image (object storage is external)
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Post
// =============================================================================

/// A post
///
/// `like_count` and `reply_count` are denormalized, maintained only by the
/// engagement/reply transactions. There is no client-writable path to them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub is_reply: bool,
    pub parent_post_id: Option<String>,
    pub like_count: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Viewer-annotated projections (transient, response-only)
// =============================================================================

/// A post annotated for the requesting viewer
///
/// Computed per request by joining author metadata and the viewer's like
/// edge in a single query; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ViewerPost {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub is_reply: bool,
    pub parent_post_id: Option<String>,
    pub like_count: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    /// Author's handle (joined from accounts)
    pub author_handle: String,
    /// Author's avatar reference (joined from accounts)
    pub author_avatar_url: Option<String>,
    /// Whether the requesting viewer has liked this post
    pub liked: bool,
}

/// Public account fields returned by account search
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ViewerAccount {
    pub id: String,
    pub handle: String,
    pub biography: Option<String>,
    pub avatar_url: Option<String>,
}

/// Account detail with follower/following counts and the viewer's
/// relationship, assembled from independent reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub handle: String,
    pub biography: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub followers: i64,
    pub following: i64,
    /// Whether the authenticated viewer follows this account
    pub viewer_follows: bool,
}
