use std::sync::Arc;

use docrelay_persist::{SessionStore, UserStore};
use docrelay_provider::ProviderClient;

use crate::config::Config;
use crate::service::SessionService;

/// Shared application state passed to all handlers.
///
/// Store and provider sit behind trait objects so tests can swap in
/// in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: SessionService,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        sessions: Arc<dyn SessionStore>,
        users: Arc<dyn UserStore>,
        provider: Arc<dyn ProviderClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            service: SessionService::new(sessions, provider),
            users,
        }
    }
}
