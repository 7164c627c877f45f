//! Reddit content source using the OAuth listing API.
//!
//! Authenticates with the client-credentials grant, then reads
//! `/user/<name>/submitted` and `/user/<name>/comments` from
//! `oauth.reddit.com`, newest first.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::credentials::RedditCredentials;
use crate::http::{check_response, HttpError};
use crate::identity::Username;

use super::{CommentRecord, ContentSource, FetchError, FetchResult, PostRecord};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const PERMALINK_ORIGIN: &str = "https://www.reddit.com";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// OAuth token endpoint response.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent API calls.
    pub access_token: String,
}

/// A Reddit listing envelope.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct Listing {
    /// Listing payload.
    pub data: ListingData,
}

/// The `data` object of a listing.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ListingData {
    /// The things in this listing, newest first when `sort=new`.
    pub children: Vec<ListingChild>,
}

/// One thing in a listing.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ListingChild {
    /// The thing's fields. Submissions and comments share one shape here;
    /// absent fields deserialize to `None`.
    pub data: ThingData,
}

/// Fields of a submission or comment thing.
#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
pub struct ThingData {
    /// Submission title.
    pub title: Option<String>,
    /// Submission self-text body.
    pub selftext: Option<String>,
    /// Canonical submission URL.
    pub url: Option<String>,
    /// Comment body.
    pub body: Option<String>,
    /// Site-relative permalink path.
    pub permalink: Option<String>,
}

// ---------------------------------------------------------------------------
// Listing decoding (pub for integration testing)
// ---------------------------------------------------------------------------

/// Decode a submissions listing body into post records, truncated to `limit`.
///
/// # Errors
///
/// Returns `FetchError::Parse` when the body is not a listing.
#[doc(hidden)]
pub fn parse_posts(body: &str, limit: usize) -> Result<Vec<PostRecord>, FetchError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .take(limit)
        .map(|child| PostRecord {
            title: child.data.title.unwrap_or_default(),
            text: child.data.selftext.unwrap_or_default(),
            url: child.data.url.unwrap_or_default(),
        })
        .collect())
}

/// Decode a comments listing body into comment records, truncated to `limit`.
///
/// Comment URLs are built by joining the permalink path onto the site origin.
///
/// # Errors
///
/// Returns `FetchError::Parse` when the body is not a listing.
#[doc(hidden)]
pub fn parse_comments(body: &str, limit: usize) -> Result<Vec<CommentRecord>, FetchError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .take(limit)
        .map(|child| CommentRecord {
            body: child.data.body.unwrap_or_default(),
            url: format!(
                "{PERMALINK_ORIGIN}{}",
                child.data.permalink.unwrap_or_default()
            ),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Reddit OAuth API client.
///
/// Authenticates per fetch with the client-credentials grant; holds no
/// state between invocations.
#[derive(Debug, Clone)]
pub struct RedditClient {
    credentials: RedditCredentials,
    client: reqwest::Client,
}

impl RedditClient {
    /// Create a new Reddit client from platform credentials.
    pub fn new(credentials: RedditCredentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Obtain an application-only bearer token.
    async fn access_token(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header("user-agent", &self.credentials.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(HttpError::from)?;

        let body = check_response(response).await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(token.access_token)
    }

    /// Fetch one listing feed (`submitted` or `comments`) for a user.
    async fn listing(
        &self,
        token: &str,
        username: &Username,
        feed: &str,
        limit: u32,
    ) -> Result<String, FetchError> {
        let url = format!("{API_BASE}/user/{username}/{feed}");
        let response = self
            .client
            .get(&url)
            .query(&[("sort", "new".to_owned()), ("limit", limit.to_string())])
            .header("authorization", format!("bearer {token}"))
            .header("user-agent", &self.credentials.user_agent)
            .send()
            .await
            .map_err(HttpError::from)?;

        Ok(check_response(response).await?)
    }
}

#[async_trait]
impl ContentSource for RedditClient {
    async fn recent_activity(&self, username: &Username, limit: u32) -> FetchResult {
        let mut result = FetchResult::default();

        let token = match self.access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(user = %username, error = %e, "reddit authentication failed");
                result.errors.push(e);
                return result;
            }
        };

        match self.listing(&token, username, "submitted", limit).await {
            Ok(body) => match parse_posts(&body, limit as usize) {
                Ok(posts) => {
                    debug!(user = %username, count = posts.len(), "fetched submissions");
                    result.posts = posts;
                }
                Err(e) => {
                    warn!(user = %username, error = %e, "failed to decode submissions");
                    result.errors.push(e);
                }
            },
            Err(e) => {
                warn!(user = %username, error = %e, "failed to fetch submissions");
                result.errors.push(e);
            }
        }

        match self.listing(&token, username, "comments", limit).await {
            Ok(body) => match parse_comments(&body, limit as usize) {
                Ok(comments) => {
                    debug!(user = %username, count = comments.len(), "fetched comments");
                    result.comments = comments;
                }
                Err(e) => {
                    warn!(user = %username, error = %e, "failed to decode comments");
                    result.errors.push(e);
                }
            },
            Err(e) => {
                warn!(user = %username, error = %e, "failed to fetch comments");
                result.errors.push(e);
            }
        }

        result
    }
}
