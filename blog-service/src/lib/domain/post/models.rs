use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::domain::post::errors::PostContentError;
use crate::domain::user::models::UserId;

/// Post unique identifier type (database-assigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post aggregate entity.
///
/// `like_count` is a cached aggregate of the like ledger, maintained in
/// lock-step with membership by the ledger's transactional toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub text: Option<String>,
    pub files: Option<String>,
    pub link: Option<String>,
    pub preview: Option<Preview>,
    pub author_id: UserId,
    pub like_count: i64,
}

/// Scraped link preview, or the sentinel for a link that yielded nothing.
///
/// `file` is the stored path of the downloaded preview image, absent when
/// the page offered a description but no fetchable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    Found {
        description: String,
        file: Option<String>,
    },
    NotFound,
}

/// Content for a new post.
///
/// Exactly one of text, files, or link; the constructor is the API-boundary
/// enforcement point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostCommand {
    pub text: Option<String>,
    pub files: Option<String>,
    pub link: Option<String>,
}

impl CreatePostCommand {
    pub fn new(
        text: Option<String>,
        files: Option<String>,
        link: Option<String>,
    ) -> Result<Self, PostContentError> {
        Self::ensure_exactly_one(text.is_some(), files.is_some(), link.is_some())?;
        Ok(Self { text, files, link })
    }

    /// Presence-only validation, for callers that must reject a bad mix
    /// before the files field can be materialized (uploads have side
    /// effects).
    pub fn ensure_exactly_one(
        text: bool,
        files: bool,
        link: bool,
    ) -> Result<(), PostContentError> {
        let supplied = [text, files, link].into_iter().filter(|s| *s).count();
        if supplied != 1 {
            return Err(PostContentError::ExactlyOneRequired);
        }
        Ok(())
    }
}

/// Fully assembled post ready for insertion (preview already resolved).
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub text: Option<String>,
    pub files: Option<String>,
    pub link: Option<String>,
    pub preview: Option<Preview>,
    pub author_id: UserId,
}

/// A page request for the post feed.
///
/// `limit` is clamped into `1..=MAX_LIMIT`; an unbounded limit would let a
/// single request drag the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: i64 = 5;
    pub const MAX_LIMIT: i64 = 50;

    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(0),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        // Saturate rather than overflow on absurd page numbers; past the
        // end of the table the result is an empty page either way.
        self.page.saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_content_kind() {
        assert!(CreatePostCommand::new(Some("hi".into()), None, None).is_ok());
        assert!(CreatePostCommand::new(None, Some("a.png".into()), None).is_ok());
        assert!(CreatePostCommand::new(None, None, Some("http://x".into())).is_ok());
    }

    #[test]
    fn test_no_content_is_rejected() {
        let result = CreatePostCommand::new(None, None, None);
        assert_eq!(result, Err(PostContentError::ExactlyOneRequired));
    }

    #[test]
    fn test_multiple_content_kinds_are_rejected() {
        let result = CreatePostCommand::new(Some("hi".into()), None, Some("http://x".into()));
        assert_eq!(result, Err(PostContentError::ExactlyOneRequired));
    }

    #[test]
    fn test_presence_check_matches_constructor() {
        assert!(CreatePostCommand::ensure_exactly_one(false, true, false).is_ok());
        assert_eq!(
            CreatePostCommand::ensure_exactly_one(true, true, false),
            Err(PostContentError::ExactlyOneRequired)
        );
        assert_eq!(
            CreatePostCommand::ensure_exactly_one(false, false, false),
            Err(PostContentError::ExactlyOneRequired)
        );
    }

    #[test]
    fn test_page_request_clamps() {
        assert_eq!(PageRequest::new(-3, 0), PageRequest::new(0, 1));
        assert_eq!(PageRequest::new(0, 500).limit(), PageRequest::MAX_LIMIT);
        assert_eq!(PageRequest::new(2, 5).offset(), 10);
    }

    #[test]
    fn test_page_request_offset_saturates() {
        assert_eq!(PageRequest::new(i64::MAX, 5).offset(), i64::MAX);
        assert_eq!(PageRequest::new(i64::MAX, PageRequest::MAX_LIMIT).offset(), i64::MAX);
    }
}
