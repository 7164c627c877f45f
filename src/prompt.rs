//! Prompt assembly — deterministic rendering of fetched records into the
//! persona-building instruction prompt.
//!
//! Pure string construction. Same input, byte-identical output. Posts always
//! render before comments; empty sequences render as empty sections.

use crate::fetch::{CommentRecord, PostRecord};
use crate::identity::Username;

/// System message establishing the assistant's role for persona generation.
pub const SYSTEM_MESSAGE: &str =
    "You are a helpful assistant who builds detailed user personas from social media data.";

/// The assembled persona-building prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaPrompt(String);

impl PersonaPrompt {
    /// The prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt, yielding the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Render the posts section: `- <title>` with indented body and URL lines,
/// one block per record, joined by newlines.
pub fn render_posts(posts: &[PostRecord]) -> String {
    posts
        .iter()
        .map(|p| format!("- {}\n  {}\n  URL: {}", p.title, p.text, p.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the comments section: `- <body>` with an indented URL line,
/// one block per record, joined by newlines.
pub fn render_comments(comments: &[CommentRecord]) -> String {
    comments
        .iter()
        .map(|c| format!("- {}\n  URL: {}", c.body, c.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the full persona prompt from fetched records.
///
/// The template is fixed: role statement, the seven required persona
/// attributes, the citation instruction, then `=== POSTS ===` and
/// `=== COMMENTS ===` sections in that order.
pub fn assemble(posts: &[PostRecord], comments: &[CommentRecord], username: &Username) -> PersonaPrompt {
    let text_posts = render_posts(posts);
    let text_comments = render_comments(comments);

    PersonaPrompt(format!(
        "You are a persona-building assistant.\n\
         Use the following Reddit posts and comments by u/{username} to create a detailed user persona.\n\
         Include:\n\
         - Name (can be invented),\n\
         - Age range,\n\
         - Interests,\n\
         - Personality traits,\n\
         - Occupation (guess if not mentioned),\n\
         - Writing style,\n\
         - Typical subreddit activity\n\
         \n\
         Cite specific posts/comments under each characteristic.\n\
         \n\
         === POSTS ===\n\
         {text_posts}\n\
         \n\
         === COMMENTS ===\n\
         {text_comments}\n"
    ))
}
