use crate::DEFAULT_CAPACITY;
use crate::response::CachedResponse;
use moka::Expiry;
use moka::sync::Cache;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// The shared cache tier.
///
/// Implementations must keep explicit nulls apart from missing keys and honour the TTL given
/// on every write.
pub trait SharedCache<V>: Debug + Send + Sync {
    fn get(&self, key: &str) -> CachedResponse<V>;
    fn set(&self, key: &str, value: Option<V>, ttl: Duration);
    fn delete(&self, key: &str);
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: Option<V>,
    ttl: Duration,
}

#[derive(Debug)]
struct PerEntryTtl;

impl<V> Expiry<String, Entry<V>> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry<V>, _at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry<V>,
        _at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Bounded in-memory shared tier backed by [`moka::sync::Cache`].
#[derive(Debug, Clone)]
pub struct MokaSharedCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, Entry<V>>,
}

impl<V: Clone + Send + Sync + 'static> MokaSharedCache<V> {
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(capacity).expire_after(PerEntryTtl).build();
        Self { cache }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for MokaSharedCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V: Clone + Debug + Send + Sync + 'static> SharedCache<V> for MokaSharedCache<V> {
    fn get(&self, key: &str) -> CachedResponse<V> {
        self.cache.get(key).map(|entry| entry.value).into()
    }

    fn set(&self, key: &str, value: Option<V>, ttl: Duration) {
        self.cache.insert(key.to_owned(), Entry { value, ttl });
    }

    fn delete(&self, key: &str) {
        self.cache.invalidate(key);
    }
}
