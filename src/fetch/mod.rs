//! Content fetching — bounded retrieval of a user's recent Reddit activity.
//!
//! Defines the flat record types, the best-effort [`FetchResult`], and the
//! [`ContentSource`] trait the pipeline depends on. The production
//! implementation lives in [`reddit`].

use async_trait::async_trait;

use crate::http::HttpError;
use crate::identity::Username;

pub mod reddit;

/// Default number of submissions and comments fetched per user.
pub const DEFAULT_LIMIT: u32 = 5;

/// One fetched submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// Submission title.
    pub title: String,
    /// Self-text body. Empty for link posts with no body.
    pub text: String,
    /// Canonical submission URL.
    pub url: String,
}

/// One fetched comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Comment body text.
    pub body: String,
    /// Full URL built from the comment's permalink path.
    pub url: String,
}

/// Errors that can occur while listing a user's activity.
///
/// These never cross the fetch boundary as `Err`; they are collected into
/// [`FetchResult::errors`] so the pipeline can degrade to partial data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport or status failure against the Reddit API.
    #[error("reddit api error: {0}")]
    Http(#[from] HttpError),
    /// Listing response did not match the expected schema.
    #[error("reddit response parse error: {0}")]
    Parse(String),
}

/// The outcome of a best-effort fetch.
///
/// Both sequences are newest-first and bounded by the requested limit.
/// A non-empty `errors` list marks the result as partial (or, when both
/// sequences are empty, as failed); there is no `Err` case — downstream
/// stages must tolerate empty input.
#[derive(Debug, Default)]
pub struct FetchResult {
    /// Recent submissions, newest first.
    pub posts: Vec<PostRecord>,
    /// Recent comments, newest first.
    pub comments: Vec<CommentRecord>,
    /// Failures encountered along the way, if any.
    pub errors: Vec<FetchError>,
}

impl FetchResult {
    /// Whether both sub-fetches completed without error.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether nothing at all was retrieved.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }
}

/// A source of recent user activity.
///
/// Implementations must be `Send + Sync` so the pipeline can hold them as
/// trait objects. The contract is best-effort: failures are reported inside
/// the [`FetchResult`], never as `Err`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Retrieve up to `limit` recent submissions and up to `limit` recent
    /// comments for `username`, newest first.
    async fn recent_activity(&self, username: &Username, limit: u32) -> FetchResult;
}
