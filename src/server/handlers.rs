use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::Transcriber;
use crate::application::{TranscribeError, TranscribeInput};
use crate::server::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub transcription: String,
}

#[tracing::instrument(skip_all, fields(bytes = body.len()))]
pub async fn transcribe_handler<T>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TranscribeResponse>, TranscribeError>
where
    T: Transcriber + 'static,
{
    let content_type = headers
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let output = state
        .use_case
        .execute(TranscribeInput {
            audio: body.to_vec(),
            content_type,
        })
        .await?;

    tracing::info!(
        encoding = %output.encoding,
        segments = output.segments,
        chars = output.transcript.text().len(),
        "Transcription complete"
    );

    Ok(Json(TranscribeResponse {
        transcription: output.transcript.into_text(),
    }))
}
