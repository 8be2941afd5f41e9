//! Application state wiring all services together.
//!
//! AppState holds the long-lived instances shared by the CLI and REST API:
//! the chat service (provider + catalog), the session store, and the loaded
//! configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use supportbot_core::chat::router::RouterOptions;
use supportbot_core::chat::service::ChatService;
use supportbot_core::llm::box_provider::BoxLlmProvider;
use supportbot_core::session::memory::InMemorySessionStore;
use supportbot_infra::catalog::load_catalog;
use supportbot_infra::config::resolve_api_key;
use supportbot_infra::llm::create_provider;
use supportbot_types::catalog::Product;
use supportbot_types::config::ServiceConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub sessions: InMemorySessionStore,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Resolve the API key, load the catalog and wire the chat service.
    pub async fn init(config: ServiceConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.llm)?;

        let catalog = load_catalog(Path::new(&config.catalog.path))
            .await
            .with_context(|| {
                format!("failed to load product catalog from {}", config.catalog.path)
            })?;

        let provider = create_provider(&config.llm, api_key);
        Ok(Self::from_parts(provider, catalog, config))
    }

    /// Build state from already-constructed parts.
    pub fn from_parts(provider: BoxLlmProvider, catalog: Vec<Product>, config: ServiceConfig) -> Self {
        let options = RouterOptions::from_config(&config.chat, &config.llm);
        Self {
            chat_service: Arc::new(ChatService::new(provider, catalog, options)),
            sessions: InMemorySessionStore::new(),
            config: Arc::new(config),
        }
    }

    /// Model used when a chat request omits one.
    pub fn default_model(&self) -> &str {
        &self.config.llm.default_model
    }
}
