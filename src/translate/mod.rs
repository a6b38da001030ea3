//! Translation engine between the chat-completions surface and Gemini
//!
//! Converts the external model id into a resolution directive, chat messages
//! into Gemini contents, and the selected response chunk back into the
//! OpenAI-style images envelope.

pub mod context;
pub mod model;
pub mod request;
pub mod response;

pub use context::{build_contents, translate_content};
pub use model::{select_resolution, MODEL_BASE};
pub use request::build_generate_request;
pub use response::translate_response;
