//! Main app runner for server mode

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::application::ports::ConfigStore;
use crate::application::TranscribeAudioUseCase;
use crate::domain::config::AppConfig;
use crate::domain::transcription::RecognitionSettings;
use crate::infrastructure::auth;
use crate::infrastructure::{
    init_tracing, Credentials, GoogleSpeechTranscriber, LogFormat, XdgConfigStore,
};
use crate::server::{create_router, AppState};

use super::presenter::Presenter;
use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Environment variable holding a Speech API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable holding an OAuth access token
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

/// Resolved options for server mode
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
    pub endpoint: String,
    pub settings: RecognitionSettings,
    pub credentials: Credentials,
    pub log_format: LogFormat,
}

impl ServeOptions {
    /// Build options from a merged config and resolved credentials
    pub fn from_config(
        config: &AppConfig,
        credentials: Credentials,
        log_format: LogFormat,
    ) -> Self {
        Self {
            host: config.host_or_default().to_string(),
            port: config.port_or_default(),
            body_limit: config.body_limit_bytes(),
            endpoint: config.endpoint_or_default().to_string(),
            settings: config.recognition_settings(),
            credentials,
            log_format,
        }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Run the relay until SIGINT/SIGTERM
pub async fn run_server(options: ServeOptions) -> ExitCode {
    let presenter = Presenter::new();
    init_tracing(options.log_format);

    // Single provider client shared by every request
    let transcriber =
        GoogleSpeechTranscriber::with_base_url(options.credentials.clone(), &options.endpoint);
    let use_case = TranscribeAudioUseCase::new(transcriber, options.settings.clone());
    let router = create_router(AppState::new(use_case), options.body_limit);

    let addr = options.bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            presenter.error(&format!("Failed to bind {}: {}", addr, e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let local_addr = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or(addr);

    tracing::info!(
        addr = %local_addr,
        endpoint = %options.endpoint,
        credentials = options.credentials.kind(),
        language_code = %options.settings.language_code,
        punctuation = options.settings.automatic_punctuation,
        sample_rate_hertz = ?options.settings.sample_rate_hertz,
        body_limit = options.body_limit,
        "Server initialized"
    );
    presenter.info(&presenter.format_listening(&local_addr));

    match axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Server error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Pick credentials.
///
/// Explicit settings win over ambient ones: an access token in the
/// environment, then an API key, then application default credentials
/// (service account key file or metadata server).
pub async fn resolve_credentials(config: &AppConfig) -> Result<Credentials, String> {
    if let Some(token) = env::var(ACCESS_TOKEN_ENV).ok().filter(|s| !s.is_empty()) {
        return Ok(Credentials::AccessToken(token));
    }

    if let Some(key) = config.api_key.clone().filter(|s| !s.is_empty()) {
        return Ok(Credentials::ApiKey(key));
    }

    match auth::discover().await {
        Ok(Some(provider)) => Ok(Credentials::ApplicationDefault(Arc::new(provider))),
        Ok(None) => Err(format!(
            "Missing credentials. Set {}, {} or {}, or run 'speech-relay config set api_key <key>'",
            API_KEY_ENV,
            ACCESS_TOKEN_ENV,
            auth::CREDENTIALS_FILE_ENV
        )),
        Err(e) => Err(format!("Application default credentials unusable: {}", e)),
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        api_key: env::var(API_KEY_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
