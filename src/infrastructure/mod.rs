//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Google Speech API,
//! Google OAuth and the filesystem.

pub mod auth;
pub mod config;
pub mod observability;
pub mod transcription;

// Re-export adapters
pub use auth::{AdcTokenProvider, AuthError};
pub use config::XdgConfigStore;
pub use observability::{init_tracing, LogFormat};
pub use transcription::{Credentials, GoogleSpeechTranscriber};
