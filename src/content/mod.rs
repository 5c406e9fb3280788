//! Content sourcing: built-in lists, the generative story API, and the
//! moderation filter that screens generated text.

pub mod builtin;
pub mod filter;
pub mod generator;
pub mod prompt;

pub use builtin::WordList;
pub use generator::{GeneratorConfig, StoryGenerator};
pub use prompt::{PromptConfig, PromptGenerator};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("story generation is not configured")]
    Disabled,
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation service returned {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("generation service returned no text")]
    EmptyResponse,
}
