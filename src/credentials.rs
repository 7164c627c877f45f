//! Credential loading from the process environment and an optional `.env`.

use std::collections::BTreeMap;

use tracing::debug;

/// Default `User-Agent` sent to the Reddit API when `REDDIT_USER_AGENT`
/// is unset.
pub const DEFAULT_USER_AGENT: &str = "PersonaScraper by /u/Potential-Win-4655";

const KNOWN_KEYS: [&str; 4] = [
    "HF_API_TOKEN",
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "REDDIT_USER_AGENT",
];

/// Reddit API credentials resolved from the environment.
#[derive(Clone)]
pub struct RedditCredentials {
    /// OAuth application client id.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: String,
    /// `User-Agent` header value sent with every request.
    pub user_agent: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Credentials loaded at startup.
#[derive(Clone, Default)]
pub struct Credentials {
    vars: BTreeMap<String, String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("keys", &self.vars.keys().collect::<Vec<_>>())
            .field("values", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Build credentials from a key-value map (for testing).
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }

    /// Load known credential keys from the process environment, after
    /// merging a `.env` file in the working directory if one exists.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(_) => debug!("no .env file found"),
        }

        let vars = KNOWN_KEYS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| ((*key).to_owned(), value)))
            .collect();
        Self { vars }
    }

    /// Returns a credential value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns a required credential or an error when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the key does not exist in loaded credentials.
    pub fn require(&self, key: &str) -> anyhow::Result<String> {
        self.vars
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required credential: {key}"))
    }

    /// Resolve the Reddit API credential set.
    ///
    /// `REDDIT_USER_AGENT` falls back to [`DEFAULT_USER_AGENT`] when unset.
    ///
    /// # Errors
    ///
    /// Returns an error when the client id or secret is missing.
    pub fn reddit(&self) -> anyhow::Result<RedditCredentials> {
        Ok(RedditCredentials {
            client_id: self.require("REDDIT_CLIENT_ID")?,
            client_secret: self.require("REDDIT_CLIENT_SECRET")?,
            user_agent: self
                .get("REDDIT_USER_AGENT")
                .unwrap_or(DEFAULT_USER_AGENT)
                .to_owned(),
        })
    }

    /// Resolve the Hugging Face API token.
    ///
    /// # Errors
    ///
    /// Returns an error when `HF_API_TOKEN` is missing.
    pub fn hf_token(&self) -> anyhow::Result<String> {
        self.require("HF_API_TOKEN")
    }
}
