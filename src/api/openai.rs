use crate::api::{ImageGeneration, TextGeneration};
use crate::error::{Result, FrameError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

const OPENAI_CHAT_API: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_IMAGE_API: &str = "https://api.openai.com/v1/images/generations";

const TEXT_TEMPERATURE: f64 = 0.8;

/// Client for the OpenAI text- and image-generation endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    text_model: String,
    image_model: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, text_model: String, image_model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            text_model,
            image_model,
            client,
        }
    }
}

#[async_trait]
impl TextGeneration for OpenAiClient {
    async fn generate_text(&self, instruction: &str, story: &str) -> Result<String> {
        info!("Requesting completion from model {}...", self.text_model);

        let request_body = json!({
            "model": self.text_model,
            "messages": [
                {
                    "role": "system",
                    "content": instruction
                },
                {
                    "role": "user",
                    "content": story
                }
            ],
            "temperature": TEXT_TEMPERATURE
        });

        let response = self
            .client
            .post(OPENAI_CHAT_API)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FrameError::ApiError(format!(
                "chat completion API error: {}",
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        // An empty choice list or null content reads as an empty completion;
        // the scene parser's padding rule handles it downstream.
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

#[async_trait]
impl ImageGeneration for OpenAiClient {
    async fn generate_image(&self, prompt: &str, size: &str) -> Result<String> {
        info!("Generating {} image for prompt: {}", size, prompt);

        let request_body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "size": size,
            "response_format": "b64_json",
            "n": 1
        });

        let response = self
            .client
            .post(OPENAI_IMAGE_API)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(FrameError::ApiError(format!(
                "image generation API error: {}",
                error_text
            )));
        }

        let generation: ImageGenerationResponse = response.json().await?;

        generation
            .data
            .into_iter()
            .next()
            .map(|image| image.b64_json)
            .ok_or_else(|| FrameError::ApiError("no image in response".to_string()))
    }
}
