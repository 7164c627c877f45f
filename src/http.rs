//! Shared HTTP response handling for the Reddit and chat-completion clients.

use regex::Regex;

/// Errors shared by all HTTP-backed clients.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Transport-level failure (connection, DNS, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Upstream responded with a non-success status.
    #[error("non-success status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
}

/// Check HTTP response status and return the body text or a structured error.
///
/// # Errors
///
/// Returns `HttpError::Transport` on transport failure, `HttpError::Status`
/// on non-2xx, with the body sanitized for logging.
pub async fn check_response(response: reqwest::Response) -> Result<String, HttpError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(HttpError::Status {
            status: status.as_u16(),
            body: sanitize_error_body(&body),
        });
    }
    Ok(body)
}

/// Collapse whitespace, redact token-shaped substrings, and truncate an
/// upstream error body before it reaches logs or the terminal.
pub fn sanitize_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [
        r"hf_[A-Za-z0-9]{20,}",
        r"api_[A-Za-z0-9]{20,}",
        r"[Bb]earer [A-Za-z0-9_\-\.]{20,}",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}
