//! Recognition settings and the per-call transcription request

use super::{AudioEncoding, AudioPayload};

/// Default BCP-47 language code sent to the provider
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Recognition options shared by every call.
///
/// `sample_rate_hertz` is `None` by default so the provider reads the rate
/// from the container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub language_code: String,
    pub automatic_punctuation: bool,
    pub sample_rate_hertz: Option<u32>,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            automatic_punctuation: true,
            sample_rate_hertz: None,
        }
    }
}

/// One provider request, built once per inbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    content: String,
    encoding: AudioEncoding,
    settings: RecognitionSettings,
}

impl TranscriptionRequest {
    /// Build a request by base64-encoding the payload
    pub fn new(payload: &AudioPayload, settings: &RecognitionSettings) -> Self {
        Self {
            content: payload.to_base64(),
            encoding: payload.encoding(),
            settings: settings.clone(),
        }
    }

    /// Base64-encoded audio content
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn encoding(&self) -> AudioEncoding {
        self.encoding
    }

    pub fn settings(&self) -> &RecognitionSettings {
        &self.settings
    }
}
