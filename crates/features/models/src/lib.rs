//! # Configuration Models
//!
//! Audited, versioned configuration on top of an append-only [`RecordStore`] and a
//! [`TieredCache`].
//!
//! ## Architecture
//!
//! * **[`Configurations`]**: owns the store, the cache and the [`SchemaRegistry`]. Built once
//!   at startup and cloned freely.
//! * **[`ConfigModel`]**: a handle on one schema. Resolves the current snapshot
//!   (cache, then store, then transient default), compares candidates with it, enumerates key
//!   values and appends new versions.
//! * **[`require_config`]**: wraps an operation so it only runs while a configuration is
//!   enabled.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use vconf_domain::{FieldDescriptor, Schema};
//! use vconf_models::Configurations;
//!
//! let configs = Configurations::builder()
//!     .schema(
//!         Schema::builder("ExampleConfig")
//!             .field(FieldDescriptor::text("string_field"))
//!             .field(FieldDescriptor::integer("int_field").with_default(10))
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let model = configs.model("ExampleConfig").unwrap();
//! assert!(!model.is_enabled(&[]).unwrap());
//!
//! let fields = json!({"string_field": "first", "enabled": true});
//! model.save_fields(fields.as_object().unwrap(), Some("admin")).unwrap();
//! assert!(model.is_enabled(&[]).unwrap());
//! assert!(model.equal_to_current(fields.as_object().unwrap()).unwrap());
//! ```
//!
//! [`RecordStore`]: vconf_store::RecordStore
//! [`TieredCache`]: vconf_cache::TieredCache

pub mod candidate;
mod configurations;
pub mod equality;
mod error;
mod gate;
pub mod keys;
mod model;
mod registry;

pub use crate::configurations::{Cached, Configurations, ConfigurationsBuilder};
pub use crate::equality::DEFAULT_IGNORED;
pub use crate::error::{ConfigError, ConfigErrorExt};
pub use crate::gate::require_config;
pub use crate::model::{ActiveRow, ConfigModel};
pub use crate::registry::SchemaRegistry;
