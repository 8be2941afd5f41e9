//! ChatService: the long-lived facade the HTTP and CLI layers call into.
//!
//! Owns the provider client and the product catalog, both fixed at startup,
//! and validates turn input before handing it to the router.

use supportbot_types::catalog::Product;
use supportbot_types::chat::{ChatMessage, ChatTurn};
use supportbot_types::error::{ChatError, InvalidInput};

use crate::chat::router::{ConversationRouter, RouterOptions};
use crate::llm::box_provider::BoxLlmProvider;

pub struct ChatService {
    provider: BoxLlmProvider,
    catalog: Vec<Product>,
    router: ConversationRouter,
}

impl ChatService {
    pub fn new(provider: BoxLlmProvider, catalog: Vec<Product>, options: RouterOptions) -> Self {
        Self {
            provider,
            catalog,
            router: ConversationRouter::new(options),
        }
    }

    /// Run one chat turn against `history`.
    ///
    /// Rejects an empty message or a blank model before any routing happens.
    /// A whitespace-only message is routed like any other text. The returned
    /// `ChatTurn::messages` is the history the caller should store.
    pub async fn respond(
        &self,
        history: &[ChatMessage],
        message: &str,
        model: &str,
    ) -> Result<ChatTurn, ChatError> {
        if message.is_empty() {
            return Err(InvalidInput::Message.into());
        }
        if model.trim().is_empty() {
            return Err(InvalidInput::Model.into());
        }

        self.router
            .route(&self.provider, &self.catalog, history, message, model)
            .await
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
