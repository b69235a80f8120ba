use std::sync::Arc;

use crate::application::ports::Transcriber;
use crate::application::TranscribeAudioUseCase;

/// Shared handler state; the use case owns the single provider client
pub struct AppState<T>
where
    T: Transcriber,
{
    pub use_case: Arc<TranscribeAudioUseCase<T>>,
}

impl<T> AppState<T>
where
    T: Transcriber,
{
    pub fn new(use_case: TranscribeAudioUseCase<T>) -> Self {
        Self {
            use_case: Arc::new(use_case),
        }
    }
}

impl<T> Clone for AppState<T>
where
    T: Transcriber,
{
    fn clone(&self) -> Self {
        Self {
            use_case: Arc::clone(&self.use_case),
        }
    }
}
