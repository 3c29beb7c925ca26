//! Timeline assembly
//!
//! Composes the social graph, posts and like edges into ordered,
//! paginated, viewer-annotated result sets.

use std::sync::Arc;

use super::page_offset;
use crate::data::{Database, ViewerPost};
use crate::error::AppError;

/// Timeline service
pub struct TimelineService {
    db: Arc<Database>,
}

impl TimelineService {
    /// Create new timeline service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get home timeline
    ///
    /// Two sequential reads: resolve the viewer's audience set (self plus
    /// followed accounts), then a single fetch+join annotating each post
    /// with author metadata and the viewer's like flag. The two reads are
    /// not transactionally coupled; a concurrent follow change may or may
    /// not be reflected (read-committed is sufficient).
    ///
    /// # Arguments
    /// * `viewer_id` - Authenticated viewer
    /// * `page` - 1-based page number
    /// * `page_size` - Posts per page
    ///
    /// # Returns
    /// Up to `page_size` posts, newest first. Empty audience, no posts,
    /// or a page past the end all yield an empty list, never an error.
    pub async fn home_timeline(
        &self,
        viewer_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ViewerPost>, AppError> {
        let offset = page_offset(page, page_size)?;

        // 1. Audience set: the viewer themselves plus everyone they follow
        let mut audience = self.db.followed_ids(viewer_id).await?;
        audience.push(viewer_id.to_string());

        // 2. Fetch + join, ordered and paginated
        self.db
            .posts_by_authors(viewer_id, &audience, page_size, offset)
            .await
    }

    /// Get author timeline
    ///
    /// Audience set is the single author; visibility is unconditional for
    /// any authenticated viewer. Annotation is identical to the home
    /// timeline. Unknown handles yield an empty list, indistinguishable
    /// here from an author with zero posts.
    pub async fn author_timeline(
        &self,
        handle: &str,
        viewer_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ViewerPost>, AppError> {
        let offset = page_offset(page, page_size)?;

        self.db
            .posts_by_handle(viewer_id, handle, page_size, offset)
            .await
    }
}
