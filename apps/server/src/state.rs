use std::sync::Arc;
use vconf::kernel::security::ActorDirectory;
use vconf::models::Configurations;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub configs: Configurations,
    pub actors: Arc<dyn ActorDirectory>,
}

impl AppState {
    pub fn new(configs: Configurations, actors: Arc<dyn ActorDirectory>) -> Self {
        Self { configs, actors }
    }
}
