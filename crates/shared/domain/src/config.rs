use crate::error::DomainError;
use crate::schema::{DEFAULT_CACHE_TIMEOUT, FieldDescriptor, FieldKind, Schema};
use crate::value::FieldValue;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level settings shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub store: StoreConfig,
    pub actors: Vec<ActorConfig>,
    pub schemas: Vec<SchemaConfig>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

/// Shared cache tier sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: u64,
}

/// Record store persistence. Without a journal the store lives in memory only.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub journal: Option<PathBuf>,
}

/// An actor allowed to author configuration changes.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorConfig {
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub superuser: bool,
}

/// A schema declared in the settings file, registered at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    pub name: String,
    #[serde(default)]
    pub key_fields: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub cache_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default = "default_compare")]
    pub compare: bool,
}

const fn default_compare() -> bool {
    true
}

impl SchemaConfig {
    /// Builds the validated [`Schema`] this declaration describes.
    pub fn to_schema(&self) -> Result<Schema, DomainError> {
        let mut builder = Schema::builder(&self.name)
            .key_fields(self.key_fields.iter().cloned())
            .cache_timeout(
                self.cache_timeout_seconds.map_or(DEFAULT_CACHE_TIMEOUT, Duration::from_secs),
            );

        for field in &self.fields {
            let mut descriptor = FieldDescriptor::new(&field.name, field.kind);
            if let Some(raw) = &field.default {
                let value = FieldValue::coerce(field.kind, raw).ok_or_else(|| {
                    DomainError::InvalidValue {
                        message: format!("default {raw} does not fit kind {}", field.kind).into(),
                        context: Some(format!("{}.{}", self.name, field.name).into()),
                    }
                })?;
                descriptor = descriptor.with_default(value);
            }
            if !field.compare {
                descriptor = descriptor.ignored_in_equality();
            }
            builder = builder.field(descriptor);
        }

        builder.build()
    }
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4590 }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 10_000 }
    }
}
