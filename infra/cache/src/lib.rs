//! # Tiered Cache
//!
//! A string-keyed cache with two tiers queried in order: a process-local map, then a shared
//! tier (bounded [`moka`] cache by default, any [`SharedCache`] implementation otherwise).
//!
//! ## Overview
//!
//! * **Explicit nulls**: a tier may hold "nothing" for a key, which is different from the key
//!   being absent. Reads return [`CachedResponse`] so callers can tell the two apart.
//! * **Per-entry TTL**: both tiers expire entries individually.
//! * **Back-fill**: a shared-tier hit is copied into the local tier.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use vconf_cache::{CachedResponse, TieredCache};
//!
//! let cache = TieredCache::<u32>::new();
//! cache.set_all_tiers("answer", Some(42), Duration::from_secs(60));
//! assert_eq!(cache.get("answer"), CachedResponse::Found(Some(42)));
//!
//! cache.delete_all_tiers("answer");
//! assert_eq!(cache.get("answer"), CachedResponse::NotFound);
//! ```

mod local;
mod response;
mod shared;
mod tiered;

pub use local::LocalCache;
pub use response::CachedResponse;
pub use shared::{MokaSharedCache, SharedCache};
pub use tiered::{TieredCache, TieredCacheBuilder};

/// Shared-tier capacity when none is configured.
pub const DEFAULT_CAPACITY: u64 = 10_000;
