use proptest::prelude::*;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;
use vconf_cache::{CachedResponse, MokaSharedCache, SharedCache, TieredCache};

const MINUTE: Duration = Duration::from_secs(60);

fn with_shared() -> (TieredCache<String>, Arc<MokaSharedCache<String>>) {
    let shared = Arc::new(MokaSharedCache::new(100));
    let cache = TieredCache::builder().shared(shared.clone()).build();
    (cache, shared)
}

#[test]
fn set_then_get_hits_local_tier() {
    let (cache, _) = with_shared();
    cache.set_all_tiers("k", Some("v".into()), MINUTE);

    assert_eq!(cache.get("k"), CachedResponse::Found(Some("v".into())));
    assert_eq!(cache.local().len(), 1);
}

#[test]
fn explicit_null_differs_from_missing() {
    let cache = TieredCache::<u32>::new();
    cache.set_all_tiers("null", None, MINUTE);

    assert_eq!(cache.get("null"), CachedResponse::Found(None));
    assert_eq!(cache.get("absent"), CachedResponse::NotFound);
}

#[test]
fn shared_hit_backfills_local_tier() {
    let (cache, shared) = with_shared();
    shared.set("k", Some("from-shared".into()), MINUTE);
    assert_eq!(cache.local().get("k"), CachedResponse::NotFound);

    assert_eq!(cache.get("k"), CachedResponse::Found(Some("from-shared".into())));
    assert_eq!(cache.local().get("k"), CachedResponse::Found(Some("from-shared".into())));
}

#[test]
fn delete_clears_both_tiers() {
    let (cache, shared) = with_shared();
    cache.set_all_tiers("k", Some("v".into()), MINUTE);
    cache.delete_all_tiers("k");

    assert_eq!(cache.get("k"), CachedResponse::NotFound);
    assert_eq!(shared.get("k"), CachedResponse::NotFound);
}

#[test]
fn clear_local_keeps_shared_tier() {
    let (cache, _) = with_shared();
    cache.set_all_tiers("k", Some("v".into()), MINUTE);
    cache.clear_local();

    assert_eq!(cache.local().len(), 0);
    assert_eq!(cache.get("k"), CachedResponse::Found(Some("v".into())));
}

#[test]
fn entries_expire_per_ttl() {
    let (cache, shared) = with_shared();
    cache.set_all_tiers("short", Some("a".into()), Duration::from_millis(20));
    cache.set_all_tiers("long", Some("b".into()), MINUTE);

    sleep(Duration::from_millis(60));

    assert_eq!(shared.get("short"), CachedResponse::NotFound);
    assert_eq!(cache.get("short"), CachedResponse::NotFound);
    assert_eq!(cache.get("long"), CachedResponse::Found(Some("b".into())));
}

#[test]
fn clones_share_state() {
    let cache = TieredCache::<u32>::new();
    let other = cache.clone();
    cache.set_all_tiers("k", Some(7), MINUTE);
    assert_eq!(other.get("k"), CachedResponse::Found(Some(7)));
}

proptest! {
    #[test]
    fn last_write_wins(values in proptest::collection::vec(proptest::option::of(any::<u16>()), 1..20)) {
        let cache = TieredCache::<u16>::new();
        for value in &values {
            cache.set_all_tiers("k", *value, MINUTE);
        }
        prop_assert_eq!(cache.get("k"), CachedResponse::Found(*values.last().unwrap()));
    }
}
