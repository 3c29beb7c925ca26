//! Engagement operations
//!
//! Like and unlike with the denormalized counter kept consistent with
//! the edge set by the store-level transactions.

use std::sync::Arc;

use crate::data::Database;
use crate::error::AppError;

/// Engagement service
pub struct EngagementService {
    db: Arc<Database>,
}

impl EngagementService {
    /// Create new engagement service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Like a post
    ///
    /// Idempotent: liking an already-liked post succeeds without
    /// changing state or double-counting.
    ///
    /// # Errors
    /// `NotFound` if the post does not exist.
    pub async fn like(&self, viewer_id: &str, post_id: &str) -> Result<(), AppError> {
        let applied = self.db.insert_like(viewer_id, post_id).await?;
        if applied {
            tracing::debug!(viewer = %viewer_id, post = %post_id, "Like applied");
        } else {
            tracing::debug!(viewer = %viewer_id, post = %post_id, "Already liked");
        }

        Ok(())
    }

    /// Unlike a post
    ///
    /// Idempotent: unliking a post that is not liked is a no-op, not a
    /// decrement.
    pub async fn unlike(&self, viewer_id: &str, post_id: &str) -> Result<(), AppError> {
        let applied = self.db.delete_like(viewer_id, post_id).await?;
        if applied {
            tracing::debug!(viewer = %viewer_id, post = %post_id, "Like removed");
        } else {
            tracing::debug!(viewer = %viewer_id, post = %post_id, "Already not liked");
        }

        Ok(())
    }
}
