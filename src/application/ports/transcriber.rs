//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{RecognitionSegment, TranscriptionRequest};

/// Speech provider errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Provider rejected the credentials: {0}")]
    InvalidCredentials(String),

    #[error("Failed to obtain access token: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for speech recognition
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Send one recognition request to the provider.
    ///
    /// # Arguments
    /// * `request` - Base64 audio with its encoding and recognition settings
    ///
    /// # Returns
    /// The provider's result segments in order; an empty list when no speech
    /// was recognized.
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Vec<RecognitionSegment>, TranscriptionError>;
}
