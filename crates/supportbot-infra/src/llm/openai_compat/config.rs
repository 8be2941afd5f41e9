//! Connection settings for OpenAI-compatible providers.

use secrecy::SecretString;

use supportbot_types::config::LlmConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "velocity", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request leaves its model blank.
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Build from the `[llm]` config section and an already-resolved key.
    pub fn from_llm_config(config: &LlmConfig, api_key: SecretString) -> Self {
        Self {
            provider_name: config.provider_name.clone(),
            base_url: config.base_url.clone(),
            api_key,
            model: config.default_model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_from_llm_config_copies_endpoint() {
        let llm = LlmConfig {
            provider_name: "local".to_string(),
            base_url: "http://localhost:8080/v1".to_string(),
            default_model: "llama3".to_string(),
            ..LlmConfig::default()
        };
        let config = OpenAiCompatConfig::from_llm_config(&llm, SecretString::from("k"));
        assert_eq!(config.api_key.expose_secret(), "k");
        assert_eq!(config.provider_name, "local");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "llama3");
    }
}
