//! OpenAI-compatible image generation proxy backed by Gemini
//!
//! Accepts chat-completions-shaped requests, translates them into Gemini
//! `streamGenerateContent` calls, aggregates the line-delimited response
//! stream, and returns the generated image as a single images envelope.

pub mod error;
pub mod gemini;
pub mod models;
pub mod server;
pub mod stream;
pub mod translate;

pub use error::{Error, Result};
