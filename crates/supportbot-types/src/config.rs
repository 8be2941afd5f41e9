//! Service configuration types for SupportBot.
//!
//! `ServiceConfig` represents the top-level `supportbot.toml`. Every field has
//! a default, so an empty or partial file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the SupportBot service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Settings for the OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Name reported in logs and spans.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key. The key itself never lives in the file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used when a chat request does not name one.
    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider_name() -> String {
    "velocity".to_string()
}

fn default_base_url() -> String {
    "https://chat.velocity.online/api".to_string()
}

fn default_api_key_env() -> String {
    "VELOCITY_API_KEY".to_string()
}

/// Default model identifier for chat completions.
pub fn default_model() -> String {
    "openai.openai/gpt-5.2".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            default_model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Where the product catalog is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "data/product.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// How prior turns are rendered into the model prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFormat {
    /// Plain `role: content` lines, oldest first.
    #[default]
    Transcript,
    /// Markdown bullets under a heading, newest first.
    Markdown,
}

/// Conversation routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Number of most recent history entries included in the model prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    #[serde(default)]
    pub history_format: HistoryFormat,
}

fn default_history_window() -> usize {
    10
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            history_format: HistoryFormat::default(),
        }
    }
}
