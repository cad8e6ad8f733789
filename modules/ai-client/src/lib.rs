//! Language model access for the chat assistant.
//!
//! [`LanguageModel`] is the seam the service depends on; [`Ollama`] is the
//! production implementation talking to a local Ollama server.

pub mod ollama;
pub mod traits;
pub mod util;

pub use ollama::Ollama;
pub use traits::{LanguageModel, Message, MessageRole};
pub use util::truncate_to_char_boundary;
