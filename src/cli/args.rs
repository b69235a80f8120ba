//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::config::AppConfig;

/// SpeechRelay - browser audio to text via Google Cloud Speech-to-Text
#[derive(Parser, Debug)]
#[command(name = "speech-relay")]
#[command(version)]
#[command(about = "HTTP relay that transcribes browser audio using Google Cloud Speech-to-Text")]
#[command(long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, value_name = "ADDR")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Maximum accepted audio body size in megabytes
    #[arg(long, value_name = "MB")]
    pub body_limit_mb: Option<u64>,

    /// BCP-47 language code sent to the provider (e.g., en-US)
    #[arg(short = 'l', long = "language", value_name = "CODE")]
    pub language_code: Option<String>,

    /// Fixed sample rate in Hz; omit to let the provider detect it
    #[arg(long = "sample-rate", value_name = "HZ")]
    pub sample_rate_hertz: Option<u32>,

    /// Disable automatic punctuation
    #[arg(long)]
    pub no_punctuation: bool,

    /// Speech API base URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config overrides given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            api_key: None, // API key comes from env/file only
            host: self.host.clone(),
            port: self.port,
            body_limit_mb: self.body_limit_mb,
            language_code: self.language_code.clone(),
            sample_rate_hertz: self.sample_rate_hertz,
            punctuation: if self.no_punctuation { Some(false) } else { None },
            endpoint: self.endpoint.clone(),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "host",
    "port",
    "body_limit_mb",
    "language_code",
    "sample_rate_hertz",
    "punctuation",
    "endpoint",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["speech-relay"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.language_code.is_none());
        assert!(cli.sample_rate_hertz.is_none());
        assert!(!cli.no_punctuation);
        assert!(!cli.json_logs);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_port() {
        let cli = Cli::parse_from(["speech-relay", "-p", "8080"]);
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["speech-relay", "--port", "99999"]).is_err());
    }

    #[test]
    fn cli_parses_recognition_options() {
        let cli = Cli::parse_from([
            "speech-relay",
            "--language",
            "de-DE",
            "--sample-rate",
            "48000",
            "--no-punctuation",
        ]);
        let config = cli.to_config();
        assert_eq!(config.language_code, Some("de-DE".to_string()));
        assert_eq!(config.sample_rate_hertz, Some(48000));
        assert_eq!(config.punctuation, Some(false));
    }

    #[test]
    fn punctuation_flag_absent_leaves_config_unset() {
        let cli = Cli::parse_from(["speech-relay"]);
        assert!(cli.to_config().punctuation.is_none());
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["speech-relay", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["speech-relay", "config", "set", "port", "8080"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "port");
            assert_eq!(value, "8080");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("api_key"));
        assert!(is_valid_config_key("sample_rate_hertz"));
        assert!(!is_valid_config_key("duration"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
