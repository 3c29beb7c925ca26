//! Substring search over accounts and posts
//!
//! No relevance ranking: results follow storage order, paginated the
//! same way as timelines.

use std::sync::Arc;

use super::page_offset;
use crate::data::{Database, ViewerAccount, ViewerPost};
use crate::error::AppError;

/// What to search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Accounts,
    Posts,
}

impl SearchKind {
    /// Parse the wire value; anything else is a validation error.
    pub fn parse(kind: &str) -> Result<Self, AppError> {
        match kind {
            "accounts" => Ok(Self::Accounts),
            "posts" => Ok(Self::Posts),
            other => Err(AppError::Validation(format!(
                "unknown search kind: {}",
                other
            ))),
        }
    }
}

/// Search results, shaped by the requested kind
#[derive(Debug, Clone)]
pub enum SearchResults {
    Accounts(Vec<ViewerAccount>),
    Posts(Vec<ViewerPost>),
}

/// Search service
pub struct SearchService {
    db: Arc<Database>,
}

impl SearchService {
    /// Create new search service
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Case-insensitive substring search
    ///
    /// An empty or whitespace-only query returns an empty result set
    /// without touching storage. Post results carry the viewer's like
    /// flag, computed by the same join as the timelines.
    pub async fn search(
        &self,
        kind: SearchKind,
        query: &str,
        viewer_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResults, AppError> {
        let offset = page_offset(page, page_size)?;

        let query = query.trim();
        if query.is_empty() {
            return Ok(match kind {
                SearchKind::Accounts => SearchResults::Accounts(vec![]),
                SearchKind::Posts => SearchResults::Posts(vec![]),
            });
        }

        match kind {
            SearchKind::Accounts => {
                let accounts = self.db.search_accounts(query, page_size, offset).await?;
                Ok(SearchResults::Accounts(accounts))
            }
            SearchKind::Posts => {
                let posts = self
                    .db
                    .search_posts(viewer_id, query, page_size, offset)
                    .await?;
                Ok(SearchResults::Posts(posts))
            }
        }
    }
}
