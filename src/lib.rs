//! Personaforge — builds a textual persona profile of a Reddit user.
//!
//! Given a profile URL, fetches the user's recent public submissions and
//! comments, renders them into a persona-building prompt, sends the prompt
//! to a chat-completion endpoint, and writes the model's answer to
//! `user_persona_<username>.txt`.
//!
//! The pipeline is strictly linear: identity → fetch → prompt → generate →
//! output. Every stage runs exactly once per invocation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod fetch;
pub mod generate;
pub mod http;
pub mod identity;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod prompt;
