//! Text-completion client used by grading.
//!
//! The grading feature only depends on [`CompletionClient`]; [`GroqClient`] is
//! the production implementation talking to an OpenAI-compatible API.

mod client;
mod groq_client;

pub use client::{CompletionClient, CompletionError};
pub use groq_client::GroqClient;
