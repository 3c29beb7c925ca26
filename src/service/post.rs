//! Post creation and lookup

use std::sync::Arc;

use crate::data::{Database, EntityId, Post};
use crate::error::AppError;

/// Post service
pub struct PostService {
    db: Arc<Database>,
}

impl PostService {
    /// Create new post service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a post authored by the principal
    ///
    /// When `parent_post_id` is set the post is a reply and the parent's
    /// reply_count is incremented atomically with the insert.
    ///
    /// # Errors
    /// Validation error for empty content, `NotFound` for an unknown
    /// parent post.
    pub async fn create_post(
        &self,
        author_id: &str,
        content: &str,
        parent_post_id: Option<String>,
    ) -> Result<Post, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation(
                "content must not be empty".to_string(),
            ));
        }

        let post = Post {
            id: EntityId::new().0,
            content: content.to_string(),
            author_id: author_id.to_string(),
            is_reply: parent_post_id.is_some(),
            parent_post_id,
            like_count: 0,
            reply_count: 0,
            created_at: chrono::Utc::now(),
        };

        self.db.insert_post(&post).await?;

        tracing::info!(post = %post.id, author = %post.author_id, "Post created");

        Ok(post)
    }
}
