use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::DeckConfig;
use crate::services::registry::SessionRegistry;

/// Shared application state, constructed once and handed to every worker
/// through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<SessionRegistry>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Deck for games created without an explicit one.
    pub fn default_deck(&self) -> &DeckConfig {
        &self.config.default_deck
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}
