//! HTTP layer - axum router, handlers and shared state
//!
//! Exposes `POST /transcribe` and maps use case errors
//! to plain-text HTTP responses.

mod error;
pub mod handlers;
mod router;
mod state;

pub use handlers::{transcribe_handler, TranscribeResponse};
pub use router::create_router;
pub use state::AppState;
