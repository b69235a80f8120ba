//! SpeechRelay - browser audio transcription relay
//!
//! This crate provides a small HTTP service that accepts raw audio uploads,
//! forwards them to Google Cloud Speech-to-Text and returns the transcript.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Codec mapping, audio payloads, transcripts, config and errors
//! - **Application**: The transcribe use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Google Speech, XDG config, tracing)
//! - **Server**: axum router and the `/transcribe` handler
//! - **CLI**: Command-line interface, config management and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
