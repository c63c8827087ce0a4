use crate::error::ConfigError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use vconf_domain::Schema;

/// Name-indexed set of known schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Arc<RwLock<FxHashMap<String, Arc<Schema>>>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `schema`. A name can only be registered once.
    pub fn register(&self, schema: Schema) -> Result<Arc<Schema>, ConfigError> {
        let mut schemas = self.schemas.write();
        if schemas.contains_key(schema.name()) {
            return Err(ConfigError::InvalidArgument {
                message: format!("schema '{}' is already registered", schema.name()).into(),
                context: None,
            });
        }

        let schema = Arc::new(schema);
        schemas.insert(schema.name().to_owned(), Arc::clone(&schema));
        info!(schema = schema.name(), keys = ?schema.key_fields(), "Registered configuration schema");
        Ok(schema)
    }

    pub fn get(&self, name: &str) -> Result<Arc<Schema>, ConfigError> {
        self.schemas.read().get(name).cloned().ok_or_else(|| ConfigError::UnknownSchema {
            message: name.to_owned().into(),
            context: None,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
