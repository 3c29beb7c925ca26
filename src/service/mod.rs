//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services orchestrate the store operations behind each core
//! operation: timeline assembly, engagement, the social graph,
//! search, accounts and posts.

mod account;
mod engagement;
mod post;
mod search;
mod social_graph;
mod timeline;

pub use account::AccountService;
pub use engagement::EngagementService;
pub use post::PostService;
pub use search::{SearchKind, SearchResults, SearchService};
pub use social_graph::SocialGraphService;
pub use timeline::TimelineService;

use crate::error::AppError;

/// Translate a 1-based page number into a row offset.
///
/// Page 0 (or a page so deep the offset overflows) is malformed input,
/// not an empty page.
pub(crate) fn page_offset(page: u32, page_size: u32) -> Result<u32, AppError> {
    if page == 0 {
        return Err(AppError::Validation("page must be at least 1".to_string()));
    }

    (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| AppError::Validation("page out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn page_offset_is_zero_based() {
        assert_eq!(page_offset(1, 15).unwrap(), 0);
        assert_eq!(page_offset(3, 15).unwrap(), 30);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(page_offset(0, 15).is_err());
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        assert!(page_offset(u32::MAX, u32::MAX).is_err());
    }
}
