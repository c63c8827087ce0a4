//! # Domain Models
//!
//! Pure configuration types shared by every crate: field values, field descriptors, schemas,
//! snapshots, identities and the application settings tree.
//! Keep it lean: no I/O, no caching, no store access. Just data and simple helpers.

pub mod config;
mod error;
pub mod identity;
pub mod schema;
pub mod snapshot;
pub mod value;

pub use error::{DomainError, DomainErrorExt};
pub use identity::{Identity, KeyValues};
pub use schema::{DEFAULT_CACHE_TIMEOUT, FieldDescriptor, FieldKind, Schema, SchemaBuilder};
pub use snapshot::Snapshot;
pub use value::FieldValue;
