use async_trait::async_trait;
use thiserror::Error;

use crate::models::ExplanationPrompt;

/// Errors that can occur when requesting an explanation
#[derive(Debug, Error)]
pub enum ExplanationError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Provider returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Prompt was blocked by the provider: {0}")]
    Blocked(String),

    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Text generation capability used to explain a recommendation
#[async_trait]
pub trait ExplanationService: Send + Sync {
    async fn generate(&self, prompt: &ExplanationPrompt) -> Result<String, ExplanationError>;
}
