//! Service configuration loader for SupportBot.
//!
//! Reads `supportbot.toml` (or the path given on the command line) and
//! deserializes it into [`ServiceConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use anyhow::Context;
use secrecy::SecretString;

use supportbot_types::config::{LlmConfig, ServiceConfig};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "supportbot.toml";

/// Load service configuration from `path`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_service_config(path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServiceConfig::default()
        }
    }
}

/// Read the LLM API key from the environment variable named in `config`.
///
/// A missing, non-unicode, or blank value is an error naming the variable.
pub fn resolve_api_key(config: &LlmConfig) -> anyhow::Result<SecretString> {
    let value = std::env::var(&config.api_key_env)
        .with_context(|| format!("environment variable {} is not set", config.api_key_env))?;

    if value.trim().is_empty() {
        anyhow::bail!("environment variable {} is empty", config.api_key_env);
    }

    Ok(SecretString::from(value))
}
