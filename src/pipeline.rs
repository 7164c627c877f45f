//! The persona pipeline: identity → fetch → prompt → generate → output.
//!
//! Strictly linear; each stage runs exactly once per invocation and every
//! external call is awaited to completion before the next begins. Fetch
//! failures degrade to partial data; generation and write failures are
//! fatal to the run.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::fetch::ContentSource;
use crate::generate::{ChatModel, ChatRequest, GenerationError};
use crate::identity::{extract_username, Username};
use crate::output::save_persona;
use crate::prompt::{assemble, SYSTEM_MESSAGE};

/// Pipeline failures surfaced to the operator.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The profile URL contains no `reddit.com/user/<name>` reference.
    /// Raised before any network activity.
    #[error("invalid Reddit profile URL: no reddit.com/user/<name> reference found")]
    InvalidReference,
    /// The chat completion call failed. Not recovered.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The persona file could not be written.
    #[error("failed to write persona file: {0}")]
    Write(#[from] std::io::Error),
}

/// Tunable pipeline parameters, resolved from configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Maximum submissions and comments fetched per user.
    pub fetch_limit: u32,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Directory persona files are written into.
    pub output_dir: PathBuf,
}

/// Summary of a completed run, for the CLI confirmation line.
#[derive(Debug)]
pub struct RunReport {
    /// The username extracted from the profile URL.
    pub username: Username,
    /// Number of posts fetched.
    pub posts_fetched: usize,
    /// Number of comments fetched.
    pub comments_fetched: usize,
    /// Whether the fetch completed without error.
    pub fetch_complete: bool,
    /// Path of the persona file written.
    pub output_path: PathBuf,
}

/// The persona-building pipeline.
///
/// Holds the fetch and generation capabilities as trait objects so tests
/// can substitute doubles for both.
pub struct Pipeline {
    source: Arc<dyn ContentSource>,
    model: Arc<dyn ChatModel>,
    settings: PipelineSettings,
}

impl Pipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(
        source: Arc<dyn ContentSource>,
        model: Arc<dyn ChatModel>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            source,
            model,
            settings,
        }
    }

    /// Run the full pipeline for one profile URL.
    ///
    /// An empty fetch result still proceeds to generation; the model is
    /// asked to build a persona from whatever data there is.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidReference`] before any network
    /// activity when the URL has no username, and propagates generation
    /// and write failures.
    pub async fn run(&self, profile_url: &str) -> Result<RunReport, PipelineError> {
        let username = extract_username(profile_url).ok_or(PipelineError::InvalidReference)?;
        info!(user = %username, "building persona");

        let fetched = self
            .source
            .recent_activity(&username, self.settings.fetch_limit)
            .await;
        if !fetched.is_complete() {
            warn!(
                user = %username,
                errors = fetched.errors.len(),
                "fetch was incomplete, continuing with partial data"
            );
        }
        info!(
            user = %username,
            posts = fetched.posts.len(),
            comments = fetched.comments.len(),
            "fetched recent activity"
        );

        let prompt = assemble(&fetched.posts, &fetched.comments, &username);

        let persona = self
            .model
            .complete(ChatRequest {
                system: SYSTEM_MESSAGE.to_owned(),
                user: prompt.into_string(),
                max_tokens: self.settings.max_tokens,
                temperature: self.settings.temperature,
            })
            .await?;

        let output_path = save_persona(&persona, &username, &self.settings.output_dir)?;
        info!(user = %username, path = %output_path.display(), "persona saved");

        Ok(RunReport {
            username,
            posts_fetched: fetched.posts.len(),
            comments_fetched: fetched.comments.len(),
            fetch_complete: fetched.is_complete(),
            output_path,
        })
    }
}
