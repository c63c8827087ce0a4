//! # Record Store
//!
//! Append-only storage for configuration snapshots.
//!
//! ## Overview
//!
//! * **Append only**: [`RecordStore::append`] always inserts a new row; nothing is updated or
//!   deleted, so the full history of a configuration stays auditable.
//! * **Deterministic ordering**: the current row of an identity is the one with the greatest
//!   `(created_at, id)` pair. Ids are assigned under a single write lock.
//! * **Durability**: [`MemoryStore`] can be opened over a JSON-lines journal that is replayed on
//!   open and synced on every append.
//! * **Injectable time**: timestamps come from a [`Clock`]; tests use [`ManualClock`].
//!
//! # Example
//!
//! ```rust
//! use vconf_domain::Snapshot;
//! use vconf_store::{MemoryStore, RecordStore};
//!
//! let store = MemoryStore::new();
//! let mut row = Snapshot { schema: "example".into(), id: None, created_at: None,
//!     created_by: None, enabled: true, fields: Default::default() };
//! row = store.append(row).unwrap();
//! assert_eq!(row.id, Some(1));
//! assert_eq!(store.latest("example", &[]).unwrap(), Some(row));
//! ```

mod clock;
mod error;
mod journal;
mod memory;
mod record;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{StoreError, StoreErrorExt};
pub use memory::{MemoryStore, MemoryStoreBuilder};
pub use record::{KeyFilter, RecordStore};
