use crate::response::CachedResponse;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug)]
struct Slot<V> {
    value: Option<V>,
    expires_at: Instant,
}

/// Process-local tier: an `FxHashMap` behind a `parking_lot` lock, entries expire lazily.
#[derive(Debug)]
pub struct LocalCache<V> {
    slots: RwLock<FxHashMap<String, Slot<V>>>,
}

impl<V> Default for LocalCache<V> {
    fn default() -> Self {
        Self { slots: RwLock::new(FxHashMap::default()) }
    }
}

impl<V: Clone> LocalCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> CachedResponse<V> {
        let now = Instant::now();
        {
            let slots = self.slots.read();
            match slots.get(key) {
                None => return CachedResponse::NotFound,
                Some(slot) if slot.expires_at > now => {
                    return CachedResponse::Found(slot.value.clone());
                },
                Some(_) => {},
            }
        }

        let mut slots = self.slots.write();
        if slots.get(key).is_some_and(|slot| slot.expires_at <= now) {
            slots.remove(key);
            trace!(key, "Local cache entry expired");
        }
        CachedResponse::NotFound
    }

    pub fn set(&self, key: &str, value: Option<V>, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.slots.write().insert(key.to_owned(), Slot { value, expires_at });
    }

    pub fn delete(&self, key: &str) {
        self.slots.write().remove(key);
    }

    pub fn clear(&self) {
        self.slots.write().clear();
    }

    /// Number of slots held, expired ones included until they are touched.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }
}
