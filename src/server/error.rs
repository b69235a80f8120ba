use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::TranscribeError;

/// Body sent for any provider failure; details stay in the logs
pub const TRANSCRIPTION_FAILED_MESSAGE: &str = "Error during transcription.";

impl IntoResponse for TranscribeError {
    fn into_response(self) -> Response {
        if self.is_invalid_input() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }

        tracing::error!(error = %self, "Transcription request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            TRANSCRIPTION_FAILED_MESSAGE,
        )
            .into_response()
    }
}
