//! Speech provider adapters

mod google_speech;

pub use google_speech::{Credentials, GoogleSpeechTranscriber};
