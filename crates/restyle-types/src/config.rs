//! Application configuration types.
//!
//! `AppConfig` mirrors `restyle.toml`. Every field has a default so an empty
//! or missing file yields a working local setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration shared by the bot and the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root of the style store.
    #[serde(default = "default_styles_dir")]
    pub styles_dir: PathBuf,

    /// Base URL the bot uses to reach the rewrite gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Address the gateway server binds to.
    #[serde(default = "default_gateway_host")]
    pub gateway_host: String,

    #[serde(default = "default_gateway_port")]
    pub gateway_port: u16,

    /// Base URL of the OpenAI-compatible completion API.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Long-poll timeout for fetching chat updates.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_styles_dir() -> PathBuf {
    PathBuf::from("styles")
}

fn default_gateway_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8000
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            styles_dir: default_styles_dir(),
            gateway_url: default_gateway_url(),
            gateway_host: default_gateway_host(),
            gateway_port: default_gateway_port(),
            openai_base_url: default_openai_base_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}
