//! Transcribe uploaded audio use case

use thiserror::Error;

use crate::domain::error::UnsupportedContentTypeError;
use crate::domain::transcription::{
    AudioEncoding, AudioPayload, RecognitionSettings, Transcript, TranscriptionRequest,
};

use super::ports::{Transcriber, TranscriptionError};

/// Errors from the transcribe use case
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("No audio data received.")]
    EmptyAudio,

    #[error(transparent)]
    UnsupportedContentType(#[from] UnsupportedContentTypeError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}

impl TranscribeError {
    /// Whether the caller sent something we cannot transcribe
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyAudio | Self::UnsupportedContentType(_))
    }
}

/// Input parameters for the transcribe use case
#[derive(Debug, Clone, Default)]
pub struct TranscribeInput {
    /// Raw request body
    pub audio: Vec<u8>,
    /// Content-Type header value, if the caller sent one
    pub content_type: Option<String>,
}

/// Output from the transcribe use case
#[derive(Debug, Clone)]
pub struct TranscribeOutput {
    /// The assembled transcript, possibly empty
    pub transcript: Transcript,
    /// Encoding the audio was sent as
    pub encoding: AudioEncoding,
    /// Number of result segments the provider returned
    pub segments: usize,
}

/// Validates an upload, forwards it to the provider and assembles the transcript
pub struct TranscribeAudioUseCase<T>
where
    T: Transcriber,
{
    transcriber: T,
    settings: RecognitionSettings,
}

impl<T> TranscribeAudioUseCase<T>
where
    T: Transcriber,
{
    /// Create a new use case instance
    pub fn new(transcriber: T, settings: RecognitionSettings) -> Self {
        Self {
            transcriber,
            settings,
        }
    }

    pub fn transcriber(&self) -> &T {
        &self.transcriber
    }

    /// Execute the transcription workflow
    pub async fn execute(
        &self,
        input: TranscribeInput,
    ) -> Result<TranscribeOutput, TranscribeError> {
        if input.audio.is_empty() {
            tracing::warn!("Received empty audio body");
            return Err(TranscribeError::EmptyAudio);
        }

        let content_type = input.content_type.unwrap_or_default();
        let encoding = match AudioEncoding::from_content_type(&content_type) {
            Ok(encoding) => encoding,
            Err(e) => {
                tracing::warn!(content_type = %content_type, "Unsupported content type");
                return Err(e.into());
            }
        };

        let payload = AudioPayload::new(input.audio, encoding);
        tracing::debug!(
            content_type = %content_type,
            encoding = %encoding,
            size = %payload.human_readable_size(),
            "Received audio"
        );

        let request = TranscriptionRequest::new(&payload, &self.settings);
        let segments = self.transcriber.transcribe(&request).await?;

        let transcript = Transcript::from_segments(&segments);
        if transcript.is_empty() {
            tracing::info!(segments = segments.len(), "Provider returned no transcript");
        }

        Ok(TranscribeOutput {
            transcript,
            encoding,
            segments: segments.len(),
        })
    }
}
