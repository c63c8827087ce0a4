//! Facade crate for vconf features and shared modules.
//! Re-exports domain/kernel primitives and wires the configuration platform from settings.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load an [`AppConfig`] with [`kernel::config::load_config`].
//! - Call [`init`] to open the record store, size the cache, register the declared schemas
//!   and build the actor directory.

use std::borrow::Cow;
use tracing::info;
pub use vconf_cache as cache;
use vconf_cache::TieredCache;
pub use vconf_domain as domain;
use vconf_domain::DomainError;
use vconf_domain::config::{AppConfig, SchemaConfig};
pub use vconf_kernel as kernel;
use vconf_kernel::security::{ActorError, MemoryActors};
pub use vconf_models as models;
use vconf_models::{ConfigError, Configurations};
pub use vconf_store as store;
use vconf_store::{MemoryStore, StoreError};
pub use vconf_transfer as transfer;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use vconf_kernel::server::system_router;
    }
}

#[vconf_derive::config_error]
pub enum InitError {
    #[error("Record store initialization failed{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Schema declaration rejected{}: {source}", format_context(.context))]
    Schema { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Configuration registry failed{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Actor directory rejected{}: {source}", format_context(.context))]
    Actors { source: ActorError, context: Option<Cow<'static, str>> },
}

/// Everything a vconf surface needs at runtime.
#[derive(Debug, Clone)]
pub struct Platform {
    pub configs: Configurations,
    pub actors: MemoryActors,
}

/// Builds the configuration platform described by `config`.
///
/// # Errors
/// Returns an error if the journal cannot be replayed, a declared schema is invalid or
/// duplicated, or two actors share a username or token.
pub fn init(config: &AppConfig) -> Result<Platform, InitError> {
    let store = match &config.store.journal {
        Some(path) => MemoryStore::builder()
            .journal(path)
            .open()
            .context(format!("journal {}", path.display()))?,
        None => MemoryStore::new(),
    };

    let schemas = config
        .schemas
        .iter()
        .map(SchemaConfig::to_schema)
        .collect::<Result<Vec<_>, _>>()?;

    let configs = Configurations::builder()
        .store(std::sync::Arc::new(store))
        .cache(TieredCache::builder().capacity(config.cache.capacity).build())
        .schemas(schemas)
        .build()?;

    let actors = MemoryActors::from_config(&config.actors)?;

    info!(
        schemas = configs.registry().names().len(),
        actors = actors.len(),
        journal = config.store.journal.is_some(),
        "Configuration platform initialized"
    );
    Ok(Platform { configs, actors })
}
