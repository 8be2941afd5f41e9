//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `supportbot-core`, plus [`create_provider`], which builds
//! the boxed provider the chat service is wired with.
//!
//! [`LlmProvider`]: supportbot_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;
use tracing::info;

use supportbot_core::llm::box_provider::BoxLlmProvider;
use supportbot_types::config::LlmConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// `api_key` is the already-resolved secret (see
/// [`crate::config::resolve_api_key`]).
pub fn create_provider(config: &LlmConfig, api_key: SecretString) -> BoxLlmProvider {
    info!(
        provider = %config.provider_name,
        base_url = %config.base_url,
        default_model = %config.default_model,
        "Configuring LLM provider"
    );
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_llm_config(config, api_key));
    BoxLlmProvider::new(provider)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use supportbot_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

    use super::*;

    /// Read one HTTP/1.1 request (headers plus `content-length` body).
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    return;
                }
            }
        }
    }

    /// Local gateway that answers every request with HTTP 500.
    async fn spawn_failing_gateway() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let counter = counter.clone();
                tokio::spawn(async move {
                    read_request(&mut socket).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                    let body = r#"{"error":{"message":"gateway exploded","type":"server_error","param":null,"code":"server_error"}}"#;
                    let response = format!(
                        "HTTP/1.1 500 Internal Server Error\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{addr}/v1"), hits)
    }

    #[test]
    fn test_create_provider_uses_configured_name() {
        let config = LlmConfig::default();
        let provider = create_provider(&config, SecretString::from("vk-test"));
        assert_eq!(provider.name(), "velocity");
    }

    #[test]
    fn test_create_provider_custom_endpoint() {
        let config = LlmConfig {
            provider_name: "custom-provider".to_string(),
            base_url: "https://custom.api.example.com/v1".to_string(),
            ..LlmConfig::default()
        };
        let provider = create_provider(&config, SecretString::from("custom-key"));
        assert_eq!(provider.name(), "custom-provider");
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let (base_url, hits) = spawn_failing_gateway().await;
        let config = LlmConfig {
            provider_name: "local".to_string(),
            base_url,
            default_model: "test-model".to_string(),
            ..LlmConfig::default()
        };
        let provider = create_provider(&config, SecretString::from("sk-local"));
        let request = CompletionRequest {
            model: "test-model".to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: "Any lamps?".to_string(),
            }],
            system: None,
            max_tokens: None,
            temperature: None,
        };

        let result = tokio::time::timeout(Duration::from_secs(10), provider.complete(&request))
            .await
            .expect("provider call should finish without waiting on retries");

        let err = result.unwrap_err();
        assert!(
            matches!(err, LlmError::Provider { .. } | LlmError::Overloaded(_)),
            "unexpected error: {err:?}"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
