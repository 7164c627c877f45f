//! Identity extraction — parses a Reddit profile URL into a username.
//!
//! The only accepted reference shape is `reddit.com/user/<name>`, matched
//! anywhere in the input string. No normalization is applied beyond what the
//! pattern enforces: no case folding, no whitespace trimming.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Username charset and URL shape accepted by [`extract_username`].
const PROFILE_PATTERN: &str = r"reddit\.com/user/([A-Za-z0-9_-]+)/?";

static PROFILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn profile_regex() -> &'static Regex {
    PROFILE_REGEX.get_or_init(|| Regex::new(PROFILE_PATTERN).expect("profile pattern is valid"))
}

/// A validated Reddit username extracted from a profile URL.
///
/// Invariant: non-empty, matches `[A-Za-z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// The username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract a Reddit username from a profile URL.
///
/// Returns `None` when the input contains no `reddit.com/user/<name>`
/// reference. The captured name is returned verbatim.
pub fn extract_username(url: &str) -> Option<Username> {
    profile_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| Username(m.as_str().to_owned()))
}
