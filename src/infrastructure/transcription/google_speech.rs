//! Google Cloud Speech-to-Text transcriber adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::config::DEFAULT_ENDPOINT;
use crate::domain::transcription::{AudioEncoding, RecognitionSegment, TranscriptionRequest};
use crate::infrastructure::auth::{AdcTokenProvider, AuthError};

/// Path of the synchronous recognize method
const RECOGNIZE_PATH: &str = "/v1/speech:recognize";

// Request types for the Speech-to-Text API

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: AudioEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate_hertz: Option<u32>,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio<'a> {
    content: &'a str,
}

// Response types for the Speech-to-Text API

#[derive(Debug, Default, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<SpeechRecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionResult {
    #[serde(default)]
    alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct SpeechRecognitionAlternative {
    transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

/// How requests authenticate against the provider
#[derive(Clone)]
pub enum Credentials {
    /// API key sent as the `key` query parameter
    ApiKey(String),
    /// Fixed OAuth access token sent as a bearer token
    AccessToken(String),
    /// Refreshing bearer token from application default credentials
    ApplicationDefault(Arc<AdcTokenProvider>),
}

impl Credentials {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api key",
            Self::AccessToken(_) => "access token",
            Self::ApplicationDefault(provider) => provider.source_name(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::AccessToken(_) => f.write_str("AccessToken(..)"),
            Self::ApplicationDefault(provider) => f
                .debug_tuple("ApplicationDefault")
                .field(provider)
                .finish(),
        }
    }
}

impl From<AuthError> for TranscriptionError {
    fn from(err: AuthError) -> Self {
        TranscriptionError::Authentication(err.to_string())
    }
}

/// Google Cloud Speech-to-Text transcriber
pub struct GoogleSpeechTranscriber {
    credentials: Credentials,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleSpeechTranscriber {
    /// Create a transcriber against the public Google endpoint
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_ENDPOINT)
    }

    /// Create a transcriber against a custom endpoint (proxies, regional hosts, tests)
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!("{}{}", self.base_url, RECOGNIZE_PATH)
    }

    /// Build the request body
    fn build_request(request: &TranscriptionRequest) -> RecognizeRequest<'_> {
        let settings = request.settings();
        RecognizeRequest {
            config: RecognitionConfig {
                encoding: request.encoding(),
                sample_rate_hertz: settings.sample_rate_hertz,
                language_code: &settings.language_code,
                enable_automatic_punctuation: settings.automatic_punctuation,
            },
            audio: RecognitionAudio {
                content: request.content(),
            },
        }
    }

    /// Convert provider results into domain segments.
    /// Alternatives without transcript text are dropped.
    fn extract_segments(response: RecognizeResponse) -> Vec<RecognitionSegment> {
        response
            .results
            .into_iter()
            .map(|result| {
                RecognitionSegment::new(
                    result
                        .alternatives
                        .into_iter()
                        .filter_map(|alt| alt.transcript)
                        .collect(),
                )
            })
            .collect()
    }

    /// Pull the message out of a provider error body, falling back to the raw text
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.status {
                Some(status) => format!("{}: {}", status, envelope.error.message),
                None => envelope.error.message,
            },
            Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
            Err(_) => body.to_string(),
        }
    }
}

#[async_trait]
impl Transcriber for GoogleSpeechTranscriber {
    async fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<Vec<RecognitionSegment>, TranscriptionError> {
        let url = self.api_url();
        let body = Self::build_request(request);

        let builder = self.client.post(&url).json(&body);
        let builder = match &self.credentials {
            Credentials::ApiKey(key) => builder.query(&[("key", key)]),
            Credentials::AccessToken(token) => builder.bearer_auth(token),
            Credentials::ApplicationDefault(provider) => {
                builder.bearer_auth(provider.token().await?)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if !status.is_success() {
            // A revoked or early-expired token must not stay cached
            if status == reqwest::StatusCode::UNAUTHORIZED {
                if let Credentials::ApplicationDefault(provider) = &self.credentials {
                    provider.invalidate().await;
                }
            }

            let error_text = response.text().await.unwrap_or_default();
            let message = Self::error_message(&error_text);

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    TranscriptionError::InvalidCredentials(message)
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => TranscriptionError::RateLimited,
                _ => TranscriptionError::ApiError(format!("HTTP {}: {}", status, message)),
            });
        }

        let response: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        Ok(Self::extract_segments(response))
    }
}
