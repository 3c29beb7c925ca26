//! Social graph operations
//!
//! Directed, asymmetric follow edges. Following does not imply being
//! followed.

use std::sync::Arc;

use crate::data::Database;
use crate::error::AppError;

/// Social graph service
pub struct SocialGraphService {
    db: Arc<Database>,
}

impl SocialGraphService {
    /// Create new social graph service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Follow an account
    ///
    /// Idempotent when the edge already exists. Self-follow always fails
    /// with a validation error regardless of prior state.
    pub async fn follow(&self, follower_id: &str, followed_id: &str) -> Result<(), AppError> {
        if follower_id == followed_id {
            return Err(AppError::Validation(
                "you can't follow yourself".to_string(),
            ));
        }

        let created = self.db.insert_follow(follower_id, followed_id).await?;
        if created {
            tracing::info!(follower = %follower_id, followed = %followed_id, "Followed");
        } else {
            tracing::debug!(follower = %follower_id, followed = %followed_id, "Already following");
        }

        Ok(())
    }

    /// Unfollow an account
    ///
    /// Idempotent when no edge exists; only the follower may remove
    /// their own edge (the follower id comes from the principal).
    pub async fn unfollow(&self, follower_id: &str, followed_id: &str) -> Result<(), AppError> {
        if follower_id == followed_id {
            return Err(AppError::Validation(
                "you can't unfollow yourself".to_string(),
            ));
        }

        let removed = self.db.delete_follow(follower_id, followed_id).await?;
        if removed {
            tracing::info!(follower = %follower_id, followed = %followed_id, "Unfollowed");
        } else {
            tracing::debug!(follower = %follower_id, followed = %followed_id, "Already not following");
        }

        Ok(())
    }
}
