//! Transcription domain module

mod audio_data;
mod audio_encoding;
mod request;
mod transcript;

pub use audio_data::AudioPayload;
pub use audio_encoding::AudioEncoding;
pub use request::{RecognitionSettings, TranscriptionRequest, DEFAULT_LANGUAGE_CODE};
pub use transcript::{RecognitionSegment, Transcript};
