//! Application Default Credentials for Google Cloud
//!
//! Resolution order:
//! 1) Service account key file named by `GOOGLE_APPLICATION_CREDENTIALS`
//! 2) GCE/GKE metadata server (`GCE_METADATA_HOST` overrides the address)
//!
//! Access tokens are cached in memory and refreshed shortly before they expire.

use std::env;
use std::path::Path;
use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// Environment variable naming a service account key file
pub const CREDENTIALS_FILE_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Environment variable overriding the metadata server address
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

const DEFAULT_METADATA_HOST: &str = "169.254.169.254";
const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
const METADATA_HEADER: &str = "Metadata-Flavor";
const METADATA_HEADER_VALUE: &str = "Google";
const METADATA_TIMEOUT: Duration = Duration::from_secs(3);

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for signed assertions, in seconds
const ASSERTION_LIFETIME: i64 = 3600;

/// Refresh this many seconds before the provider-reported expiry
const EXPIRY_SAFETY_WINDOW: i64 = 300;

/// Errors obtaining an access token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read credentials file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Token request failed: {0}")]
    RequestFailed(String),

    #[error("Token endpoint returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Failed to parse token response: {0}")]
    ParseError(String),
}

/// Fields of a service account JSON key that the JWT grant needs
#[derive(Deserialize)]
struct ServiceAccountFile {
    #[serde(rename = "type", default)]
    key_type: Option<String>,
    client_email: String,
    private_key: String,
    #[serde(default)]
    token_uri: Option<String>,
}

/// Parsed service account key with its signing key loaded
#[derive(Clone)]
pub struct ServiceAccountKey {
    client_email: String,
    token_uri: String,
    signing_key: EncodingKey,
}

impl ServiceAccountKey {
    /// Parse a service account JSON key
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let file: ServiceAccountFile =
            serde_json::from_str(json).map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        if let Some(other) = file.key_type.as_deref().filter(|t| *t != "service_account") {
            return Err(AuthError::InvalidKey(format!(
                "unsupported credential type '{}'",
                other
            )));
        }

        let signing_key = EncodingKey::from_rsa_pem(file.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(format!("private key: {}", e)))?;

        Ok(Self {
            client_email: file.client_email,
            token_uri: file
                .token_uri
                .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            signing_key,
        })
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at - EXPIRY_SAFETY_WINDOW > now
    }
}

#[derive(Debug)]
enum TokenSource {
    ServiceAccount(ServiceAccountKey),
    Metadata { url: String },
}

/// Bearer token provider backed by application default credentials
pub struct AdcTokenProvider {
    http: reqwest::Client,
    source: TokenSource,
    // Held across the fetch so concurrent callers share one refresh
    cache: Mutex<Option<CachedToken>>,
}

impl AdcTokenProvider {
    fn with_source(source: TokenSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            source,
            cache: Mutex::new(None),
        }
    }

    /// Sign JWT assertions with a service account key
    pub fn service_account(key: ServiceAccountKey) -> Self {
        Self::with_source(TokenSource::ServiceAccount(key))
    }

    /// Load a service account key file
    pub async fn from_credentials_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::service_account(ServiceAccountKey::from_json(&content)?))
    }

    /// Ask the metadata server at `host` (e.g. `169.254.169.254` or `127.0.0.1:8080`)
    pub fn metadata_server(host: &str) -> Self {
        let url = format!("http://{}{}", host.trim_end_matches('/'), METADATA_TOKEN_PATH);
        Self::with_source(TokenSource::Metadata { url })
    }

    /// Short description of where tokens come from, for logs
    pub fn source_name(&self) -> &'static str {
        match self.source {
            TokenSource::ServiceAccount(_) => "service account",
            TokenSource::Metadata { .. } => "metadata server",
        }
    }

    /// Current access token, fetching a new one when the cached token is near expiry
    pub async fn token(&self) -> Result<String, AuthError> {
        let mut cache = self.cache.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(now)) {
            return Ok(cached.token.clone());
        }

        let response = match &self.source {
            TokenSource::ServiceAccount(key) => self.fetch_service_account(key, now).await?,
            TokenSource::Metadata { url } => self.fetch_metadata(url).await?,
        };

        tracing::debug!(
            source = self.source_name(),
            expires_in = response.expires_in,
            "Fetched access token"
        );

        *cache = Some(CachedToken {
            token: response.access_token.clone(),
            expires_at: now + response.expires_in,
        });

        Ok(response.access_token)
    }

    /// Drop the cached token so the next call fetches a fresh one
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn fetch_service_account(
        &self,
        key: &ServiceAccountKey,
        now: i64,
    ) -> Result<TokenResponse, AuthError> {
        let claims = Claims {
            iss: &key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key.signing_key)
            .map_err(|e| AuthError::InvalidKey(format!("failed to sign assertion: {}", e)))?;

        let response = self
            .http
            .post(&key.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        Self::read_token(response).await
    }

    async fn fetch_metadata(&self, url: &str) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .get(url)
            .header(METADATA_HEADER, METADATA_HEADER_VALUE)
            .timeout(METADATA_TIMEOUT)
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        Self::read_token(response).await
    }

    async fn read_token(response: reqwest::Response) -> Result<TokenResponse, AuthError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::ParseError(e.to_string()))
    }
}

impl std::fmt::Debug for AdcTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdcTokenProvider")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Look for ambient credentials.
///
/// A key file named by `GOOGLE_APPLICATION_CREDENTIALS` must load, otherwise
/// this fails. Without one, the metadata server is asked for a token; `Ok(None)` means
/// it did not hand out a token.
pub async fn discover() -> Result<Option<AdcTokenProvider>, AuthError> {
    if let Some(path) = env::var(CREDENTIALS_FILE_ENV).ok().filter(|p| !p.is_empty()) {
        return AdcTokenProvider::from_credentials_file(path).await.map(Some);
    }

    let host = env::var(METADATA_HOST_ENV)
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_METADATA_HOST.to_string());

    let provider = AdcTokenProvider::metadata_server(&host);
    match provider.token().await {
        Ok(_) => Ok(Some(provider)),
        Err(e) => {
            tracing::debug!(host = %host, error = %e, "Metadata server unavailable");
            Ok(None)
        }
    }
}
