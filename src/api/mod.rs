mod openai;

pub use openai::OpenAiClient;

use crate::error::Result;
use async_trait::async_trait;

/// Text-generation capability: one instruction, one story, one completion.
///
/// An empty completion is a valid result, not an error.
#[async_trait]
pub trait TextGeneration {
    async fn generate_text(&self, instruction: &str, story: &str) -> Result<String>;
}

/// Image-generation capability: one prompt, one target resolution, one
/// base64-encoded image.
#[async_trait]
pub trait ImageGeneration {
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String>;
}
