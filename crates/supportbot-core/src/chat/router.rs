//! Conversation router: the per-turn state machine.
//!
//! 1. Append the user message to a copy of the history
//! 2. Classify intent
//! 3. Order status -> static lookup, no model call
//! 4. Product question -> prompt builder + one completion request
//! 5. Append the assistant reply and return the updated history
//!
//! Steps 1-3 are pure. Step 4 relays the model's text unmodified; failures
//! and timeouts propagate without retry.

use std::time::Duration;

use tracing::{Instrument, debug, info, info_span};

use supportbot_types::catalog::Product;
use supportbot_types::chat::{ChatMessage, ChatTurn, Intent};
use supportbot_types::config::{ChatConfig, HistoryFormat, LlmConfig};
use supportbot_types::error::ChatError;
use supportbot_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use crate::intent::classify;
use crate::llm::box_provider::BoxLlmProvider;
use crate::order::{extract_order_id, format_order_reply, order_status};
use crate::prompt::{
    HISTORY_WINDOW, build_conversation_context, build_product_answer_prompt,
    build_question_with_history, build_transcript, support_agent_system_prompt,
};

/// Default upper bound on a single completion call.
const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Tunables for the product-question path.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Most recent history entries (including the new user message) sent to the model.
    pub history_window: usize,
    pub history_format: HistoryFormat,
    pub llm_timeout: Duration,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            history_window: HISTORY_WINDOW,
            history_format: HistoryFormat::Transcript,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl RouterOptions {
    /// Derive router options from the `[chat]` and `[llm]` config sections.
    pub fn from_config(chat: &ChatConfig, llm: &LlmConfig) -> Self {
        Self {
            history_window: chat.history_window,
            history_format: chat.history_format,
            llm_timeout: Duration::from_secs(llm.timeout_secs),
            max_tokens: llm.max_tokens,
            temperature: llm.temperature,
        }
    }
}

/// Routes one user message to the order table or the model.
#[derive(Debug, Clone, Default)]
pub struct ConversationRouter {
    options: RouterOptions,
}

impl ConversationRouter {
    pub fn new(options: RouterOptions) -> Self {
        Self { options }
    }

    /// Route a user message and return the reply plus the updated history.
    ///
    /// `session_messages` is never mutated; the returned history is a new
    /// vector whose prefix equals it. On error no history is produced, so the
    /// caller's stored state is left untouched.
    pub async fn route(
        &self,
        provider: &BoxLlmProvider,
        products: &[Product],
        session_messages: &[ChatMessage],
        user_message: &str,
        model: &str,
    ) -> Result<ChatTurn, ChatError> {
        let mut messages = Vec::with_capacity(session_messages.len() + 2);
        messages.extend_from_slice(session_messages);
        messages.push(ChatMessage::user(user_message));

        let intent = classify(user_message);
        debug!(intent = %intent, history_len = session_messages.len(), "Message classified");

        let reply = match intent {
            Intent::OrderStatus => {
                let order_id = extract_order_id(user_message);
                let status = order_status(&order_id);
                info!(order_id = %order_id, "Answered order status from lookup table");
                format_order_reply(&order_id, &status)
            }
            Intent::ProductQuestion => {
                self.answer_product_question(provider, products, &messages, user_message, model)
                    .await?
            }
        };

        messages.push(ChatMessage::assistant(reply.clone()));

        Ok(ChatTurn {
            reply,
            messages,
            intent,
        })
    }

    /// Render recent history in the configured format.
    fn render_history(&self, messages: &[ChatMessage]) -> String {
        match self.options.history_format {
            HistoryFormat::Transcript => build_transcript(messages, self.options.history_window),
            HistoryFormat::Markdown => {
                build_conversation_context(messages, self.options.history_window)
            }
        }
    }

    /// Build the outbound completion request for a product question.
    ///
    /// `messages` already ends with the current user message.
    pub fn build_request(
        &self,
        products: &[Product],
        messages: &[ChatMessage],
        user_message: &str,
        model: &str,
    ) -> CompletionRequest {
        let history = self.render_history(messages);
        let question = build_question_with_history(&history, user_message);

        CompletionRequest {
            model: model.to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: build_product_answer_prompt(products, &question),
            }],
            system: Some(support_agent_system_prompt().to_string()),
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
        }
    }

    async fn answer_product_question(
        &self,
        provider: &BoxLlmProvider,
        products: &[Product],
        messages: &[ChatMessage],
        user_message: &str,
        model: &str,
    ) -> Result<String, LlmError> {
        let request = self.build_request(products, messages, user_message, model);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = ?request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let limit = self.options.llm_timeout;
        let response = tokio::time::timeout(limit, provider.complete(&request))
            .instrument(span)
            .await
            .map_err(|_| LlmError::Timeout {
                after_ms: limit.as_millis() as u64,
            })??;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        info!(
            response_id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "Product question answered"
        );

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::llm::provider::LlmProvider;
    use supportbot_types::llm::{CompletionResponse, StopReason, Usage};

    #[derive(Clone)]
    enum MockResult {
        Reply(String),
        Error,
        Hang,
    }

    /// Records every request and answers with a fixed result.
    #[derive(Clone)]
    struct MockProvider {
        result: MockResult,
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl MockProvider {
        fn new(result: MockResult) -> Self {
            Self {
                result,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(MockResult::Reply(text.to_string()))
        }

        fn calls(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.result {
                MockResult::Reply(text) => Ok(CompletionResponse {
                    id: "resp-1".to_string(),
                    content: text.clone(),
                    model: request.model.clone(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage {
                        input_tokens: 10,
                        output_tokens: 20,
                    },
                }),
                MockResult::Error => Err(LlmError::Provider {
                    message: "boom".to_string(),
                }),
                MockResult::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(LlmError::EmptyResponse)
                }
            }
        }
    }

    fn catalog() -> Vec<Product> {
        vec![Product {
            id: "1".to_string(),
            name: "Blue Widget".to_string(),
            description: "A widget, but blue".to_string(),
            price: "19.99".to_string(),
            category: "widgets".to_string(),
        }]
    }

    #[tokio::test]
    async fn order_status_skips_provider() {
        let mock = MockProvider::replying("should not be used");
        let provider = BoxLlmProvider::new(mock.clone());
        let router = ConversationRouter::default();

        let turn = router
            .route(&provider, &catalog(), &[], "order status 12345", "m")
            .await
            .unwrap();

        assert_eq!(turn.intent, Intent::OrderStatus);
        assert!(turn.reply.contains("- Order ID: **12345**"));
        assert!(turn.reply.contains("- Status: Your order is being processed."));
        assert!(mock.calls().is_empty());
        assert_eq!(
            turn.messages,
            vec![
                ChatMessage::user("order status 12345"),
                ChatMessage::assistant(turn.reply.clone()),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_order_uses_not_found_status() {
        let provider = BoxLlmProvider::new(MockProvider::replying("unused"));
        let router = ConversationRouter::default();

        let turn = router
            .route(&provider, &[], &[], "What is the status of order 99999?", "m")
            .await
            .unwrap();

        assert!(turn.reply.contains("- Status: Order 99999 not found."));
    }

    #[tokio::test]
    async fn product_question_relays_model_text_verbatim() {
        let mock = MockProvider::replying("  ### Blue Widget\n- $19.99  ");
        let provider = BoxLlmProvider::new(mock.clone());
        let router = ConversationRouter::default();

        let turn = router
            .route(&provider, &catalog(), &[], "Tell me about the blue widget", "gpt-x")
            .await
            .unwrap();

        assert_eq!(turn.intent, Intent::ProductQuestion);
        assert_eq!(turn.reply, "  ### Blue Widget\n- $19.99  ");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.model, "gpt-x");
        assert_eq!(request.system.as_deref(), Some(support_agent_system_prompt()));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);

        let content = &request.messages[0].content;
        assert!(content.contains("| 1 | Blue Widget | widgets | 19.99 | A widget, but blue |"));
        assert!(content.contains("### User request\nConversation so far:\nuser: Tell me about the blue widget"));
        assert!(content.contains("Current user question: Tell me about the blue widget"));
    }

    #[tokio::test]
    async fn prompt_history_is_limited_to_window() {
        let mock = MockProvider::replying("ok");
        let provider = BoxLlmProvider::new(mock.clone());
        let router = ConversationRouter::default();

        let history: Vec<ChatMessage> = (0..12)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("old question {i}"))
                } else {
                    ChatMessage::assistant(format!("old answer {i}"))
                }
            })
            .collect();

        router
            .route(&provider, &catalog(), &history, "any lamps?", "m")
            .await
            .unwrap();

        let content = mock.calls()[0].messages[0].content.clone();
        // Window of 10 includes the new message, so entries 3..=11 survive.
        assert!(!content.contains("old question 2"));
        assert!(content.contains("assistant: old answer 3"));
        assert!(content.contains("user: any lamps?"));
    }

    #[tokio::test]
    async fn markdown_history_format_is_used_when_configured() {
        let mock = MockProvider::replying("ok");
        let provider = BoxLlmProvider::new(mock.clone());
        let router = ConversationRouter::new(RouterOptions {
            history_format: HistoryFormat::Markdown,
            ..RouterOptions::default()
        });

        router
            .route(
                &provider,
                &catalog(),
                &[ChatMessage::user("hi"), ChatMessage::assistant("hello")],
                "lamps?",
                "m",
            )
            .await
            .unwrap();

        let content = mock.calls()[0].messages[0].content.clone();
        assert!(content.contains(
            "### Conversation (most recent first)\n- **User:** lamps?\n- **Assistant:** hello\n- **User:** hi"
        ));
    }

    #[tokio::test]
    async fn options_flow_into_request() {
        let mock = MockProvider::replying("ok");
        let provider = BoxLlmProvider::new(mock.clone());
        let router = ConversationRouter::new(RouterOptions {
            max_tokens: Some(256),
            temperature: Some(0.2),
            ..RouterOptions::default()
        });

        router
            .route(&provider, &catalog(), &[], "lamps?", "m")
            .await
            .unwrap();

        let request = &mock.calls()[0];
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.temperature, Some(0.2));
    }

    #[tokio::test]
    async fn history_grows_by_two_and_prefix_is_unchanged() {
        let provider = BoxLlmProvider::new(MockProvider::replying("answer"));
        let router = ConversationRouter::default();

        let first = router
            .route(&provider, &catalog(), &[], "hello", "m")
            .await
            .unwrap();
        assert_eq!(first.messages.len(), 2);

        let second = router
            .route(&provider, &catalog(), &first.messages, "order status 11111", "m")
            .await
            .unwrap();
        assert_eq!(second.messages.len(), 4);
        assert_eq!(&second.messages[..2], &first.messages[..]);
        assert_eq!(second.messages[2], ChatMessage::user("order status 11111"));
        assert_eq!(second.messages[3].role, supportbot_types::chat::ChatRole::Assistant);
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let provider = BoxLlmProvider::new(MockProvider::new(MockResult::Error));
        let router = ConversationRouter::default();

        let err = router
            .route(&provider, &catalog(), &[], "lamps?", "m")
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Upstream(LlmError::Provider { .. })));
    }

    #[tokio::test]
    async fn empty_response_is_an_error() {
        let provider = BoxLlmProvider::new(MockProvider::replying("   "));
        let router = ConversationRouter::default();

        let err = router
            .route(&provider, &catalog(), &[], "lamps?", "m")
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Upstream(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let provider = BoxLlmProvider::new(MockProvider::new(MockResult::Hang));
        let router = ConversationRouter::new(RouterOptions {
            llm_timeout: Duration::from_millis(20),
            ..RouterOptions::default()
        });

        let err = router
            .route(&provider, &catalog(), &[], "lamps?", "m")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChatError::Upstream(LlmError::Timeout { after_ms: 20 })
        ));
    }

    #[test]
    fn options_from_config() {
        let chat = ChatConfig {
            history_window: 4,
            history_format: HistoryFormat::Markdown,
        };
        let llm = LlmConfig {
            timeout_secs: 5,
            max_tokens: Some(100),
            ..LlmConfig::default()
        };
        let options = RouterOptions::from_config(&chat, &llm);
        assert_eq!(options.history_window, 4);
        assert_eq!(options.history_format, HistoryFormat::Markdown);
        assert_eq!(options.llm_timeout, Duration::from_secs(5));
        assert_eq!(options.max_tokens, Some(100));
        assert!(options.temperature.is_none());
    }
}
