//! Application default credentials against mock token endpoints

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use speech_relay::infrastructure::auth::{AdcTokenProvider, AuthError};

const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
const SERVICE_ACCOUNT_FIXTURE: &str = include_str!("fixtures/service_account.json");
const CLIENT_EMAIL: &str = "relay-test@speech-relay-test.iam.gserviceaccount.com";

fn metadata_provider(server: &MockServer) -> AdcTokenProvider {
    AdcTokenProvider::metadata_server(server.address().to_string().as_str())
}

fn token_body(token: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": token,
        "expires_in": expires_in,
        "token_type": "Bearer"
    })
}

/// Write the fixture key with its token endpoint pointed at `token_uri`
fn write_key_file(dir: &TempDir, token_uri: &str) -> std::path::PathBuf {
    let mut key: serde_json::Value = serde_json::from_str(SERVICE_ACCOUNT_FIXTURE).unwrap();
    key["token_uri"] = json!(token_uri);

    let path = dir.path().join("service_account.json");
    std::fs::write(&path, key.to_string()).unwrap();
    path
}

#[tokio::test]
async fn metadata_token_is_cached_until_near_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(METADATA_TOKEN_PATH))
        .and(header("Metadata-Flavor", "Google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ya29.meta", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = metadata_provider(&server);
    assert_eq!(provider.token().await.unwrap(), "ya29.meta");
    assert_eq!(provider.token().await.unwrap(), "ya29.meta");
}

#[tokio::test]
async fn short_lived_token_is_refreshed() {
    let server = MockServer::start().await;

    // Expires inside the refresh window, so every call fetches again
    Mock::given(method("GET"))
        .and(path(METADATA_TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ya29.short", 60)))
        .expect(2)
        .mount(&server)
        .await;

    let provider = metadata_provider(&server);
    provider.token().await.unwrap();
    provider.token().await.unwrap();
}

#[tokio::test]
async fn invalidate_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(METADATA_TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ya29.meta", 3600)))
        .expect(2)
        .mount(&server)
        .await;

    let provider = metadata_provider(&server);
    provider.token().await.unwrap();
    provider.invalidate().await;
    provider.token().await.unwrap();
}

#[tokio::test]
async fn metadata_error_status_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(METADATA_TOKEN_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("no service account"))
        .mount(&server)
        .await;

    let err = metadata_provider(&server).token().await.unwrap_err();
    match err {
        AuthError::Rejected { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("no service account"));
        }
        other => panic!("Expected Rejected, got: {:?}", other),
    }
}

#[tokio::test]
async fn service_account_exchanges_signed_assertion() {
    let server = MockServer::start().await;
    let token_uri = format!("{}/token", server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("ya29.sa", 3599)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let provider = AdcTokenProvider::from_credentials_file(write_key_file(&dir, &token_uri))
        .await
        .unwrap();
    assert_eq!(provider.source_name(), "service account");

    assert_eq!(provider.token().await.unwrap(), "ya29.sa");
    // Second call is served from the cache
    assert_eq!(provider.token().await.unwrap(), "ya29.sa");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let assertion = body
        .split('&')
        .find_map(|pair| pair.strip_prefix("assertion="))
        .unwrap();

    let segments: Vec<&str> = assertion.split('.').collect();
    assert_eq!(segments.len(), 3);

    let header: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
    assert_eq!(header["alg"], "RS256");

    let claims: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
    assert_eq!(claims["iss"], CLIENT_EMAIL);
    assert_eq!(claims["aud"], token_uri.as_str());
    assert_eq!(
        claims["scope"],
        "https://www.googleapis.com/auth/cloud-platform"
    );
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
        3600
    );
}

#[tokio::test]
async fn token_endpoint_rejection_is_reported() {
    let server = MockServer::start().await;
    let token_uri = format!("{}/token", server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let provider = AdcTokenProvider::from_credentials_file(write_key_file(&dir, &token_uri))
        .await
        .unwrap();

    let err = provider.token().await.unwrap_err();
    assert!(matches!(err, AuthError::Rejected { status: 400, .. }));
    assert!(err.to_string().contains("invalid_grant"));
}
