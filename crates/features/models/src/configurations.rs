use crate::error::ConfigError;
use crate::model::ConfigModel;
use crate::registry::SchemaRegistry;
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::Mutex;
use std::sync::Arc;
use vconf_cache::TieredCache;
use vconf_domain::{FieldValue, Schema, Snapshot};
use vconf_store::{MemoryStore, RecordStore};

/// What the configuration cache holds: a resolved snapshot or a key-values enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cached {
    Snapshot(Snapshot),
    KeyValues(Vec<Vec<FieldValue>>),
}

#[derive(Debug)]
pub(crate) struct ConfigurationsInner {
    pub(crate) store: Arc<dyn RecordStore>,
    pub(crate) cache: TieredCache<Cached>,
    pub(crate) registry: SchemaRegistry,
    /// Every key-values cache key issued, per schema, so a write can invalidate them all.
    pub(crate) key_value_keys: Mutex<FxHashMap<String, FxHashSet<String>>>,
}

/// Entry point to versioned configuration: a store, a cache and the known schemas.
///
/// Cheap to clone; clones share everything.
#[derive(Debug, Clone)]
pub struct Configurations {
    pub(crate) inner: Arc<ConfigurationsInner>,
}

impl Configurations {
    pub fn builder() -> ConfigurationsBuilder {
        ConfigurationsBuilder::default()
    }

    /// Handle on the schema registered as `name`.
    pub fn model(&self, name: &str) -> Result<ConfigModel, ConfigError> {
        let schema = self.inner.registry.get(name)?;
        Ok(ConfigModel::new(self.clone(), schema))
    }

    pub fn register(&self, schema: Schema) -> Result<ConfigModel, ConfigError> {
        let schema = self.inner.registry.register(schema)?;
        Ok(ConfigModel::new(self.clone(), schema))
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.inner.registry
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.inner.store
    }

    pub fn cache(&self) -> &TieredCache<Cached> {
        &self.inner.cache
    }

    /// Drops the process-local cache tier. Call at request boundaries.
    pub fn clear_request_cache(&self) {
        self.inner.cache.clear_local();
    }

    pub(crate) fn remember_key_values_key(&self, schema: &str, key: &str) {
        self.inner
            .key_value_keys
            .lock()
            .entry(schema.to_owned())
            .or_default()
            .insert(key.to_owned());
    }

    pub(crate) fn issued_key_values_keys(&self, schema: &str) -> Vec<String> {
        self.inner
            .key_value_keys
            .lock()
            .get(schema)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Builder for [`Configurations`]. Defaults to a volatile [`MemoryStore`] and a default
/// [`TieredCache`].
#[derive(Debug, Default)]
#[must_use]
pub struct ConfigurationsBuilder {
    store: Option<Arc<dyn RecordStore>>,
    cache: Option<TieredCache<Cached>>,
    schemas: Vec<Schema>,
}

impl ConfigurationsBuilder {
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn cache(mut self, cache: TieredCache<Cached>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn schemas(mut self, schemas: impl IntoIterator<Item = Schema>) -> Self {
        self.schemas.extend(schemas);
        self
    }

    /// # Errors
    /// Fails when two schemas share a name.
    pub fn build(self) -> Result<Configurations, ConfigError> {
        let registry = SchemaRegistry::new();
        for schema in self.schemas {
            registry.register(schema)?;
        }

        Ok(Configurations {
            inner: Arc::new(ConfigurationsInner {
                store: self.store.unwrap_or_else(|| Arc::new(MemoryStore::new())),
                cache: self.cache.unwrap_or_default(),
                registry,
                key_value_keys: Mutex::new(FxHashMap::default()),
            }),
        })
    }
}
