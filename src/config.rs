use crate::api::OpenAiClient;
use crate::error::{FrameError, Result};

pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

/// Settings for interacting with the OpenAI generation services.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
}

impl Settings {
    /// Read settings from the environment (after `dotenvy` has run).
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            text_model: std::env::var("TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
        }
    }

    /// Build a configured client, failing if the API key is missing.
    pub fn client(&self) -> Result<OpenAiClient> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            FrameError::EnvError(
                "OPENAI_API_KEY is not set. Provide it via environment variable or .env file"
                    .to_string(),
            )
        })?;
        Ok(OpenAiClient::new(
            api_key,
            self.text_model.clone(),
            self.image_model.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_fails_without_api_key() {
        let settings = Settings {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        };
        assert!(matches!(settings.client(), Err(FrameError::EnvError(_))));
    }

    #[test]
    fn client_builds_with_api_key() {
        let settings = Settings {
            api_key: Some("sk-test".to_string()),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        };
        assert!(settings.client().is_ok());
    }
}
