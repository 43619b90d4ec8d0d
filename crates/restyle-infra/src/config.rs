//! Configuration loader.
//!
//! Reads `restyle.toml` into [`AppConfig`], falling back to defaults when the
//! file is missing or malformed, then applies environment overrides. Secrets
//! are read from the environment only.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use restyle_types::config::AppConfig;

/// Overrides [`AppConfig::styles_dir`].
pub const STYLES_DIR_VAR: &str = "RESTYLE_STYLES_DIR";
/// Overrides [`AppConfig::gateway_url`].
pub const GATEWAY_URL_VAR: &str = "REWRITE_GATEWAY_URL";
/// Overrides [`AppConfig::openai_base_url`].
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// API key for the completion provider (gateway).
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Chat transport token (bot).
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Load configuration from `path`, then apply environment overrides.
///
/// - If the file does not exist, starts from [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and starts from
///   the default.
pub async fn load_config(path: &Path) -> AppConfig {
    let mut config = read_config_file(path).await;
    apply_overrides(&mut config, |var| std::env::var(var).ok());
    config
}

async fn read_config_file(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are ignored.
pub fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(dir) = get(STYLES_DIR_VAR) {
        config.styles_dir = PathBuf::from(dir);
    }
    if let Some(url) = get(GATEWAY_URL_VAR) {
        config.gateway_url = url;
    }
    if let Some(url) = get(OPENAI_BASE_URL_VAR) {
        config.openai_base_url = url;
    }
}

/// Read a required secret from the environment.
pub fn require_secret(var: &str) -> anyhow::Result<SecretString> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
        _ => anyhow::bail!("environment variable {var} is not set"),
    }
}
