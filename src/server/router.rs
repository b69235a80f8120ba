use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::Transcriber;
use crate::server::handlers::transcribe_handler;
use crate::server::state::AppState;

/// Build the relay router.
///
/// Bodies larger than `body_limit` bytes are rejected with 413 before the
/// handler runs.
pub fn create_router<T>(state: AppState<T>, body_limit: usize) -> Router
where
    T: Transcriber + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/transcribe", post(transcribe_handler::<T>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
