use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("image decode error: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("environment variable error: {0}")]
    EnvError(String),
}

pub type Result<T> = std::result::Result<T, FrameError>;
