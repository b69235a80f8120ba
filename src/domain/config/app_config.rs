//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::transcription::{RecognitionSettings, DEFAULT_LANGUAGE_CODE};

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default inbound body limit in megabytes
pub const DEFAULT_BODY_LIMIT_MB: u64 = 10;

/// Default speech provider base URL
pub const DEFAULT_ENDPOINT: &str = "https://speech.googleapis.com";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub body_limit_mb: Option<u64>,
    pub language_code: Option<String>,
    pub sample_rate_hertz: Option<u32>,
    pub punctuation: Option<bool>,
    pub endpoint: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            body_limit_mb: Some(DEFAULT_BODY_LIMIT_MB),
            language_code: Some(DEFAULT_LANGUAGE_CODE.to_string()),
            sample_rate_hertz: None,
            punctuation: Some(true),
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            body_limit_mb: other.body_limit_mb.or(self.body_limit_mb),
            language_code: other.language_code.or(self.language_code),
            sample_rate_hertz: other.sample_rate_hertz.or(self.sample_rate_hertz),
            punctuation: other.punctuation.or(self.punctuation),
            endpoint: other.endpoint.or(self.endpoint),
        }
    }

    /// Get host, or "0.0.0.0" if not set
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Get port, or 3000 if not set
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Get the body limit in bytes
    pub fn body_limit_bytes(&self) -> usize {
        let mb = self.body_limit_mb.unwrap_or(DEFAULT_BODY_LIMIT_MB);
        usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// Get provider endpoint, or the public Google endpoint if not set
    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Build recognition settings from the language, punctuation and sample rate fields
    pub fn recognition_settings(&self) -> RecognitionSettings {
        let defaults = RecognitionSettings::default();
        RecognitionSettings {
            language_code: self
                .language_code
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.language_code),
            automatic_punctuation: self
                .punctuation
                .unwrap_or(defaults.automatic_punctuation),
            sample_rate_hertz: self.sample_rate_hertz.or(defaults.sample_rate_hertz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert_eq!(config.host, Some("0.0.0.0".to_string()));
        assert_eq!(config.port, Some(3000));
        assert_eq!(config.body_limit_mb, Some(10));
        assert_eq!(config.language_code, Some("en-US".to_string()));
        assert!(config.sample_rate_hertz.is_none());
        assert_eq!(config.punctuation, Some(true));
        assert_eq!(
            config.endpoint,
            Some("https://speech.googleapis.com".to_string())
        );
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.host.is_none());
        assert!(config.port.is_none());
        assert!(config.punctuation.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            port: Some(3000),
            language_code: Some("en-US".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            port: None, // Should not override
            language_code: Some("fr-FR".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.port, Some(3000)); // Kept from base
        assert_eq!(merged.language_code, Some("fr-FR".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            api_key: Some("key".to_string()),
            punctuation: Some(false),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.api_key, Some("key".to_string()));
        assert_eq!(merged.punctuation, Some(false));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.host_or_default(), "0.0.0.0");
        assert_eq!(config.port_or_default(), 3000);
        assert_eq!(config.body_limit_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.endpoint_or_default(), "https://speech.googleapis.com");
    }

    #[test]
    fn body_limit_converts_megabytes() {
        let config = AppConfig {
            body_limit_mb: Some(20),
            ..Default::default()
        };
        assert_eq!(config.body_limit_bytes(), 20 * 1024 * 1024);
    }

    #[test]
    fn recognition_settings_from_empty_config() {
        let settings = AppConfig::empty().recognition_settings();
        assert_eq!(settings, RecognitionSettings::default());
    }

    #[test]
    fn recognition_settings_from_configured_values() {
        let config = AppConfig {
            language_code: Some("es-ES".to_string()),
            punctuation: Some(false),
            sample_rate_hertz: Some(48000),
            ..Default::default()
        };
        let settings = config.recognition_settings();
        assert_eq!(settings.language_code, "es-ES");
        assert!(!settings.automatic_punctuation);
        assert_eq!(settings.sample_rate_hertz, Some(48000));
    }

    #[test]
    fn blank_language_code_uses_default() {
        let config = AppConfig {
            language_code: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.recognition_settings().language_code, "en-US");
    }
}
