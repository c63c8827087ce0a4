use crate::DEFAULT_CAPACITY;
use crate::local::LocalCache;
use crate::response::CachedResponse;
use crate::shared::{MokaSharedCache, SharedCache};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// How long a shared-tier hit lives in the local tier after being copied there.
const DEFAULT_BACKFILL_TTL: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct TieredCacheInner<V> {
    local: LocalCache<V>,
    shared: Arc<dyn SharedCache<V>>,
    backfill_ttl: Duration,
}

/// Local tier in front of a shared tier. Cloning is cheap and shares both tiers.
#[derive(Debug)]
pub struct TieredCache<V> {
    inner: Arc<TieredCacheInner<V>>,
}

impl<V> Clone for TieredCache<V> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<V: Clone + Debug + Send + Sync + 'static> Default for TieredCache<V> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<V: Clone + Debug + Send + Sync + 'static> TieredCache<V> {
    /// Local tier in front of a default-sized [`MokaSharedCache`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TieredCacheBuilder<V> {
        TieredCacheBuilder {
            shared: None,
            capacity: DEFAULT_CAPACITY,
            backfill_ttl: DEFAULT_BACKFILL_TTL,
        }
    }

    /// Looks the key up in the local tier, then in the shared tier.
    pub fn get(&self, key: &str) -> CachedResponse<V> {
        if let found @ CachedResponse::Found(_) = self.inner.local.get(key) {
            trace!(key, tier = "local", "Cache hit");
            return found;
        }

        match self.inner.shared.get(key) {
            CachedResponse::Found(value) => {
                trace!(key, tier = "shared", "Cache hit");
                self.inner.local.set(key, value.clone(), self.inner.backfill_ttl);
                CachedResponse::Found(value)
            },
            CachedResponse::NotFound => {
                trace!(key, "Cache miss");
                CachedResponse::NotFound
            },
        }
    }

    pub fn set_all_tiers(&self, key: &str, value: Option<V>, ttl: Duration) {
        self.inner.local.set(key, value.clone(), ttl);
        self.inner.shared.set(key, value, ttl);
    }

    pub fn delete_all_tiers(&self, key: &str) {
        self.inner.local.delete(key);
        self.inner.shared.delete(key);
        trace!(key, "Cache entry invalidated");
    }

    /// Drops the whole local tier, leaving the shared tier untouched.
    pub fn clear_local(&self) {
        self.inner.local.clear();
    }

    pub fn local(&self) -> &LocalCache<V> {
        &self.inner.local
    }
}

#[derive(Debug)]
#[must_use]
pub struct TieredCacheBuilder<V> {
    shared: Option<Arc<dyn SharedCache<V>>>,
    capacity: u64,
    backfill_ttl: Duration,
}

impl<V: Clone + Debug + Send + Sync + 'static> TieredCacheBuilder<V> {
    /// Uses a custom shared tier instead of the default moka one.
    pub fn shared(mut self, shared: Arc<dyn SharedCache<V>>) -> Self {
        self.shared = Some(shared);
        self
    }

    /// Capacity of the default shared tier. Ignored when a custom tier is given.
    pub const fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    pub const fn backfill_ttl(mut self, ttl: Duration) -> Self {
        self.backfill_ttl = ttl;
        self
    }

    pub fn build(self) -> TieredCache<V> {
        let shared = self
            .shared
            .unwrap_or_else(|| Arc::new(MokaSharedCache::<V>::new(self.capacity)));
        TieredCache {
            inner: Arc::new(TieredCacheInner {
                local: LocalCache::default(),
                shared,
                backfill_ttl: self.backfill_ttl,
            }),
        }
    }
}
