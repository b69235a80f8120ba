//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    let value = display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
    presenter.output(&value);

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    };

    match key {
        "api_key" => config.api_key = Some(value.to_string()),
        "host" => {
            if value.trim().is_empty() {
                return Err(invalid("Host must not be empty"));
            }
            config.host = Some(value.trim().to_string());
        }
        "port" => {
            let port = value
                .parse::<u16>()
                .map_err(|_| invalid("Value must be a port number between 1 and 65535"))?;
            if port == 0 {
                return Err(invalid("Value must be a port number between 1 and 65535"));
            }
            config.port = Some(port);
        }
        "body_limit_mb" => {
            let mb = value
                .parse::<u64>()
                .ok()
                .filter(|mb| *mb > 0)
                .ok_or_else(|| invalid("Value must be a positive number of megabytes"))?;
            config.body_limit_mb = Some(mb);
        }
        "language_code" => {
            if value.trim().is_empty() {
                return Err(invalid("Language code must not be empty"));
            }
            config.language_code = Some(value.trim().to_string());
        }
        "sample_rate_hertz" => {
            let hz = value
                .parse::<u32>()
                .ok()
                .filter(|hz| *hz > 0)
                .ok_or_else(|| invalid("Value must be a positive sample rate in Hz"))?;
            config.sample_rate_hertz = Some(hz);
        }
        "punctuation" => {
            let enabled =
                parse_bool(value).map_err(|_| invalid("Value must be 'true' or 'false'"))?;
            config.punctuation = Some(enabled);
        }
        "endpoint" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid("Value must be an http:// or https:// URL"));
            }
            config.endpoint = Some(value.to_string());
        }
        _ => unreachable!(), // Already validated
    }

    Ok(())
}

/// Value shown by `get` and `list`
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "api_key" => config.api_key.as_deref().map(mask_api_key),
        "host" => config.host.clone(),
        "port" => config.port.map(|p| p.to_string()),
        "body_limit_mb" => config.body_limit_mb.map(|mb| mb.to_string()),
        "language_code" => config.language_code.clone(),
        "sample_rate_hertz" => config.sample_rate_hertz.map(|hz| hz.to_string()),
        "punctuation" => config.punctuation.map(|b| b.to_string()),
        "endpoint" => config.endpoint.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    if key.chars().count() <= 8 {
        "*".repeat(key.chars().count())
    } else {
        let chars: Vec<char> = key.chars().collect();
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
